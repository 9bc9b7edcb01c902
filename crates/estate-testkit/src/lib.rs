// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use estate_app::{AssetNum, Owner, OwnerId, Property, PropertyDetails};

pub const OWNER_NAMES: [&str; 9] = [
    "JLA", "DLE", "SE", "JE", "KLO", "DWL", "RKL", "Wilson", "Ament",
];

const COUNTIES: [&str; 8] = [
    "Adair", "Boone", "Clay", "Greene", "Knox", "Marion", "Polk", "Warren",
];

const STATUSES: [&str; 5] = ["owned", "leased", "listed", "sold", "under contract"];

const LOCATION_FEATURES: [&str; 10] = [
    "River bottom",
    "Hill pasture",
    "Creek crossing",
    "North forty",
    "Timber tract",
    "Homeplace",
    "Section line",
    "Bluff field",
    "Old orchard",
    "Gravel road frontage",
];

const EXEMPTIONS: [&str; 4] = ["homestead", "agricultural", "conservation", "none"];

const STREETS: [&str; 8] = [
    "County Road 12",
    "Mill Creek Rd",
    "Route 3",
    "Oak Hollow Ln",
    "Ridge Rd",
    "Farm Lane 7",
    "Church St",
    "Depot Ave",
];

const NOTE_PHRASES: [&str; 10] = [
    "fence needs repair",
    "tenant renewing in spring",
    "hay lease through fall",
    "check drainage tile",
    "timber cruise scheduled",
    "survey on file",
    "pond dam inspected",
    "cash rent paid",
    "road access easement",
    "cost share application pending",
];

pub fn demo_owners() -> Vec<Owner> {
    OWNER_NAMES
        .iter()
        .zip(1..)
        .map(|(name, id)| Owner {
            owner_id: OwnerId::new(id),
            owner_name: (*name).to_owned(),
        })
        .collect()
}

/// Deterministic property list for `--demo` mode and tests.
pub fn demo_properties(seed: u64, count: usize) -> Vec<Property> {
    let mut faker = PropertyFaker::new(seed);
    (1..=count as i64)
        .map(|asset_num| faker.property(AssetNum::new(asset_num)))
        .collect()
}

/// Minimal record with a legal description and a status, for unit tests that
/// only care about identity and one visible column.
pub fn sample_property(asset_num: i64, status: &str) -> Property {
    Property {
        asset_num: AssetNum::new(asset_num),
        details: PropertyDetails {
            legal_description: Some(format!("Lot {asset_num}")),
            status: Some(status.to_owned()),
            ..PropertyDetails::default()
        },
    }
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn chance(&mut self, one_in: usize) -> bool {
        self.int_n(one_in) == 0
    }
}

#[derive(Debug, Clone)]
pub struct PropertyFaker {
    rng: DeterministicRng,
}

impl PropertyFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn property(&mut self, asset_num: AssetNum) -> Property {
        let county = self.pick(&COUNTIES);
        let owned_by = self.owned_by();
        let acres = self.acres();
        let square_footage = (!self.rng.chance(3)).then(|| self.range(800, 3_600) as f64);
        let appraisal = self.range(40, 900) as f64 * 1_000.0;
        let section = self.range(1, 36);
        let township = self.range(60, 72);
        let range = self.range(10, 30);
        let house_number = self.range(100, 9_999);
        let street = self.pick(&STREETS);

        Property {
            asset_num,
            details: PropertyDetails {
                legal_description: Some(format!(
                    "S{section} T{township}N R{range}W, {county} County"
                )),
                location: Some(self.pick(&LOCATION_FEATURES).to_owned()),
                account_number: Some(format!("{:02}-{:05}", self.range(1, 99), asset_num.get())),
                current_appraisal: Some(appraisal),
                square_footage,
                acres: Some(acres),
                total_acreage_percent: Some(self.range(5, 100) as f64),
                owned_by: Some(owned_by.clone()),
                exemption: (!self.rng.chance(4)).then(|| self.pick(&EXEMPTIONS).to_owned()),
                county: Some(county.to_owned()),
                name_on_account: Some(owned_by),
                mailing_address: Some(format!("{house_number} {street}")),
                management_notes: (!self.rng.chance(3)).then(|| self.pick(&NOTE_PHRASES).to_owned()),
                status: Some(self.pick(&STATUSES).to_owned()),
            },
        }
    }

    /// One or two owner names joined with " & ".
    fn owned_by(&mut self) -> String {
        let first = self.pick(&OWNER_NAMES);
        if self.rng.chance(3) {
            let second = self.pick(&OWNER_NAMES);
            if second != first {
                return format!("{first} & {second}");
            }
        }
        first.to_owned()
    }

    fn acres(&mut self) -> f64 {
        let tenths = self.range(5, 3_200);
        tenths as f64 / 10.0
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}
