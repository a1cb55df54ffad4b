//! Registry list view rendered as a text table.

use car_registry_core::{CarRecord, RegistrySnapshot};
use tabled::{Table, Tabled};

const EMPTY_REGISTRY_MESSAGE: &str = "No records yet.";

#[derive(Tabled)]
struct RegistryLine<'a> {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Owner Name")]
    owner_name: &'a str,
    #[tabled(rename = "Make")]
    make: &'a str,
    #[tabled(rename = "Model")]
    model: &'a str,
    #[tabled(rename = "Year")]
    year: i64,
}

impl<'a> From<&'a CarRecord> for RegistryLine<'a> {
    fn from(record: &'a CarRecord) -> Self {
        Self {
            id: record.id,
            owner_name: &record.owner_name,
            make: &record.make,
            model: &record.model,
            year: record.year,
        }
    }
}

/// Renders every row of the snapshot, keeping insertion order.
pub fn render(snapshot: &RegistrySnapshot) -> String {
    if snapshot.is_empty() {
        return EMPTY_REGISTRY_MESSAGE.to_string();
    }
    Table::new(snapshot.cars.iter().map(RegistryLine::from)).to_string()
}
