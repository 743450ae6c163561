use rand::Rng;

pub const REFERENCE_PREFIX: &str = "EDI";

/// Exclusive upper bound of the numeric part; keeps it to five digits.
const REFERENCE_SPACE: u32 = 100_000;

/// Generates an applicant reference such as `EDI04217`.
/// Codes are not guaranteed unique; they are a human-friendly handle on the contact record.
pub fn generate_reference<R: Rng>(rng: &mut R) -> String {
    format!("{REFERENCE_PREFIX}{:05}", rng.gen_range(0..REFERENCE_SPACE))
}
