//! Pre-built Test Fixtures
//!
//! Ready-to-use records for the insurance and catalog domains. Values are
//! fixed so tests can assert on them directly.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{ProductId, VehicleId};
use domain_catalog::{ImageUpload, ProductInput, ReviewInput};
use domain_insurance::{CoverageAmounts, PolicyInput, VehicleDetails, VehicleOwner};
use rust_decimal_macros::dec;

/// Fixture for vehicle test data
pub struct VehicleFixtures;

impl VehicleFixtures {
    /// A 2020 Toyota Corolla registered as ABC-123
    pub fn corolla() -> VehicleDetails {
        VehicleDetails {
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            vin: Some("JTDBR32E720123456".to_string()),
            registration_number: "ABC-123".to_string(),
            color: Some("Silver".to_string()),
            owner: Self::owner(),
            insurance_policy_number: None,
        }
    }

    /// A 2018 Honda Civic registered as XYZ-789
    pub fn civic() -> VehicleDetails {
        VehicleDetails {
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2018,
            vin: None,
            registration_number: "XYZ-789".to_string(),
            color: Some("Blue".to_string()),
            owner: VehicleOwner {
                first_name: "Maria".to_string(),
                last_name: "Lopez".to_string(),
                ..VehicleOwner::default()
            },
            insurance_policy_number: None,
        }
    }

    pub fn owner() -> VehicleOwner {
        VehicleOwner {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: Some("john.smith@example.com".to_string()),
            phone: Some("+1-555-0100".to_string()),
            address: Some("12 Harbour Street".to_string()),
            license_number: Some("DL-4455".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 4, 12),
        }
    }
}

/// Fixture for policy test data
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// A one-year comprehensive policy for 2024 with a 500.00 premium
    pub fn annual(vehicle_id: VehicleId) -> PolicyInput {
        PolicyInput {
            policy_number: "POL-2024-001".to_string(),
            provider: "Acme Insurance".to_string(),
            vehicle_id,
            start_date: TemporalFixtures::term_start(),
            end_date: TemporalFixtures::term_end(),
            premium_amount: dec!(500.00),
            coverage_type: "COMPREHENSIVE".to_string(),
            coverage: Self::coverage(),
            notes: None,
            vehicle_image: None,
        }
    }

    pub fn coverage() -> CoverageAmounts {
        CoverageAmounts {
            deductible: Some(dec!(250.00)),
            liability: Some(dec!(100000.00)),
            comprehensive: Some(dec!(25000.00)),
            collision: Some(dec!(20000.00)),
        }
    }
}

/// Fixture for dates used across policy tests
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn term_start() -> NaiveDate {
        date(2024, 1, 1)
    }

    pub fn term_end() -> NaiveDate {
        date(2024, 12, 31)
    }

    /// A day inside the standard term
    pub fn mid_term() -> NaiveDate {
        date(2024, 6, 15)
    }

    /// A fixed instant used as "now" in deterministic tests
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }
}

/// Fixture for catalog test data
pub struct CatalogFixtures;

impl CatalogFixtures {
    pub fn product() -> ProductInput {
        ProductInput {
            name: "Roof Box".to_string(),
            price: Some(dec!(199.99)),
            description: Some("420 litre roof-mounted cargo box".to_string()),
            image_data: None,
        }
    }

    /// A tiny PNG payload (signature bytes only)
    pub fn png_bytes() -> Vec<u8> {
        vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]
    }

    pub fn image_upload() -> ImageUpload {
        ImageUpload::new("front.png", Some("image/png".to_string()), Self::png_bytes())
    }

    pub fn review(product_id: ProductId) -> ReviewInput {
        ReviewInput {
            comment: Some("Fits the Corolla perfectly".to_string()),
            rating: 5,
            product_id,
        }
    }
}

/// Builds a calendar date, panicking on impossible input
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}
