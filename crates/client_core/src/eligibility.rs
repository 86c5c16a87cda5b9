/// Delivery locations orders may be approved for. Matched exactly.
pub const ALLOWED_DELIVERY_LOCATIONS: [&str; 3] =
    ["New York, USA", "London, UK", "Berlin, Germany"];

pub fn is_eligible(delivery_location: &str) -> bool {
    ALLOWED_DELIVERY_LOCATIONS.contains(&delivery_location)
}
