//! Typed per-module records decoded from backend snapshots
//!
//! Each record names the attributes the scorer looks at and keeps every other
//! attribute verbatim in `extra`, so a result can be handed back to the UI
//! without losing data. Records are read-only snapshots.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::Module;

/// Attributes a record exposes to the relevance scorer
pub trait SearchFields {
    fn search_fields(&self) -> Vec<String>;
}

/// Join present attributes into the selector output, skipping absent ones
fn fields<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Vec<String> {
    values.into_iter().flatten().map(String::from).collect()
}

fn number(value: Option<f64>) -> Option<String> {
    value.map(|v| {
        if v.fract() == 0.0 {
            format!("{}", v as i64)
        } else {
            v.to_string()
        }
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub kind: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchFields for Property {
    fn search_fields(&self) -> Vec<String> {
        fields([
            Some(self.id.as_str()),
            self.title.as_deref(),
            self.name.as_deref(),
            self.address.as_deref(),
            self.city.as_deref(),
            self.kind.as_deref(),
            self.property_type.as_deref(),
            self.status.as_deref(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchFields for Lead {
    fn search_fields(&self) -> Vec<String> {
        fields([
            Some(self.id.as_str()),
            self.name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.status.as_deref(),
            self.source.as_deref(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub property_id: Option<String>,
    pub resource_id: Option<String>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchFields for Reservation {
    fn search_fields(&self) -> Vec<String> {
        fields([
            Some(self.id.as_str()),
            self.property_id.as_deref(),
            self.resource_id.as_deref(),
            self.guest_name.as_deref(),
            self.guest_email.as_deref(),
            self.guest_phone.as_deref(),
            self.status.as_deref(),
            self.payment_status.as_deref(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub reservation_id: Option<String>,
    pub payer_name: Option<String>,
    pub payer_email: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub method: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchFields for Payment {
    fn search_fields(&self) -> Vec<String> {
        let amount = number(self.amount);
        fields([
            Some(self.id.as_str()),
            self.reservation_id.as_deref(),
            self.payer_name.as_deref(),
            self.payer_email.as_deref(),
            amount.as_deref(),
            self.currency.as_deref(),
            self.status.as_deref(),
            self.method.as_deref(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub property_id: Option<String>,
    pub resource_id: Option<String>,
    pub author_name: Option<String>,
    pub comment: Option<String>,
    pub rating: Option<f64>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchFields for Review {
    fn search_fields(&self) -> Vec<String> {
        let rating = number(self.rating);
        fields([
            Some(self.id.as_str()),
            self.property_id.as_deref(),
            self.resource_id.as_deref(),
            self.author_name.as_deref(),
            self.comment.as_deref(),
            rating.as_deref(),
            self.status.as_deref(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchFields for StaffMember {
    fn search_fields(&self) -> Vec<String> {
        fields([
            Some(self.id.as_str()),
            self.name.as_deref(),
            self.display_name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.role.as_deref(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchFields for Client {
    fn search_fields(&self) -> Vec<String> {
        fields([
            Some(self.id.as_str()),
            self.name.as_deref(),
            self.display_name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.company.as_deref(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchFields for Profile {
    fn search_fields(&self) -> Vec<String> {
        fields([
            Some(self.id.as_str()),
            self.display_name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.company.as_deref(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub id: String,
    pub language: Option<String>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
    pub theme: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchFields for Preferences {
    fn search_fields(&self) -> Vec<String> {
        fields([
            Some(self.id.as_str()),
            self.language.as_deref(),
            self.currency.as_deref(),
            self.timezone.as_deref(),
            self.theme.as_deref(),
        ])
    }
}

/// A list-module document as held in the recency cache
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Property(Property),
    Lead(Lead),
    Reservation(Reservation),
    Payment(Payment),
    Review(Review),
    Staff(StaffMember),
    Client(Client),
}

/// A record type that lives in a module's recency pool
pub trait ModuleRecord: SearchFields + DeserializeOwned + Clone + Send + Sync + 'static {
    const MODULE: Module;

    fn into_record(self) -> Record;

    fn from_record(record: &Record) -> Option<&Self>;
}

macro_rules! module_record {
    ($ty:ty, $variant:ident, $module:expr) => {
        impl ModuleRecord for $ty {
            const MODULE: Module = $module;

            fn into_record(self) -> Record {
                Record::$variant(self)
            }

            fn from_record(record: &Record) -> Option<&Self> {
                match record {
                    Record::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

module_record!(Property, Property, Module::Properties);
module_record!(Lead, Lead, Module::Leads);
module_record!(Reservation, Reservation, Module::Reservations);
module_record!(Payment, Payment, Module::Payments);
module_record!(Review, Review, Module::Reviews);
module_record!(StaffMember, Staff, Module::Team);
module_record!(Client, Client, Module::Clients);

/// Decode raw snapshots into records, skipping the ones that do not fit
pub fn decode_records<T: ModuleRecord>(snapshots: Vec<Value>) -> Vec<Record> {
    snapshots
        .into_iter()
        .filter_map(|snapshot| match serde_json::from_value::<T>(snapshot) {
            Ok(record) => Some(record.into_record()),
            Err(e) => {
                tracing::debug!(module = %T::MODULE, error = %e, "Skipping undecodable snapshot");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reservation_fields_and_extra() {
        let r: Reservation = serde_json::from_value(json!({
            "id": "r-1",
            "resourceId": "p-9",
            "guestName": "Juan Pérez",
            "guestEmail": "juan@example.com",
            "status": "confirmed",
            "nights": 3
        }))
        .unwrap();

        assert_eq!(r.resource_id.as_deref(), Some("p-9"));
        assert!(r.property_id.is_none());
        assert_eq!(r.extra.get("nights"), Some(&json!(3)));
        assert_eq!(
            r.search_fields(),
            vec!["r-1", "p-9", "Juan Pérez", "juan@example.com", "confirmed"]
        );
    }

    #[test]
    fn test_payment_amount_rendering() {
        let p: Payment = serde_json::from_value(json!({ "id": "pay-1", "amount": 150.0 })).unwrap();
        assert_eq!(p.search_fields(), vec!["pay-1", "150"]);

        let p: Payment = serde_json::from_value(json!({ "id": "pay-2", "amount": 99.5 })).unwrap();
        assert_eq!(p.search_fields(), vec!["pay-2", "99.5"]);
    }

    #[test]
    fn test_decode_skips_malformed() {
        let records = decode_records::<Lead>(vec![
            json!({ "id": "l1", "name": "Ana" }),
            json!({ "name": "no id" }),
            json!("not an object"),
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(Lead::from_record(&records[0]).map(|l| l.id.as_str()), Some("l1"));
    }

    #[test]
    fn test_from_record_rejects_other_variants() {
        let record = Client {
            id: "c1".into(),
            name: None,
            display_name: None,
            email: None,
            phone: None,
            company: None,
            extra: Map::new(),
        }
        .into_record();
        assert!(Lead::from_record(&record).is_none());
        assert!(Client::from_record(&record).is_some());
    }

    #[test]
    fn test_alternate_names_decode_side_by_side() {
        let property: Property = serde_json::from_value(json!({
            "id": "p1",
            "title": "Casa Azul",
            "name": "casa-azul",
            "kind": "house",
            "type": "rental",
            "ownerId": "u1",
            "enabled": true
        }))
        .unwrap();
        assert_eq!(
            property.search_fields(),
            vec!["p1", "Casa Azul", "casa-azul", "house", "rental"]
        );

        let staff = decode_records::<StaffMember>(vec![
            json!({ "id": "s1", "name": "Juan", "displayName": "Juan García" }),
        ]);
        assert_eq!(staff.len(), 1);
        let member = StaffMember::from_record(&staff[0]).unwrap();
        assert_eq!(member.search_fields(), vec!["s1", "Juan", "Juan García"]);

        let reviews = decode_records::<Review>(vec![
            json!({ "id": "rv1", "propertyId": "p1", "resourceId": "p1" }),
        ]);
        assert_eq!(reviews.len(), 1);

        let clients = decode_records::<Client>(vec![
            json!({ "id": "c1", "name": "Ana", "displayName": "Ana Torres" }),
        ]);
        assert_eq!(clients.len(), 1);
    }

    #[test]
    fn test_record_roundtrips_extra_fields() {
        let raw = json!({ "id": "p1", "title": "Casa Azul", "bedrooms": 3, "ownerId": "u1" });
        let property: Property = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&property).unwrap()["bedrooms"], json!(3));
    }
}
