use super::{
    AvailabilityType, CancellationCutoffUnit, DeliveryFormat, DeliveryMethod, ExtraFields,
    RedemptionMethod, RequiredContactField, UnitType,
};
use serde::{Deserialize, Serialize};

/// A bookable item and everything needed to ingest, map and sell it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub internal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub locale: String,
    /// IANA time zone name, e.g. `Europe/London`.
    pub time_zone: String,
    pub allow_freesale: bool,
    pub instant_confirmation: bool,
    pub instant_delivery: bool,
    pub availability_required: bool,
    pub availability_type: AvailabilityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_formats: Option<Vec<DeliveryFormat>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_methods: Option<Vec<DeliveryMethod>>,
    pub redemption_method: RedemptionMethod,
    pub options: Vec<ProductOption>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Product {
    /// Returns the option flagged as default, if any.
    pub fn default_option(&self) -> Option<&ProductOption> {
        self.options.iter().find(|option| option.default)
    }

    /// Looks up an option by id.
    pub fn option(&self, option_id: &str) -> Option<&ProductOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    pub id: String,
    pub default: bool,
    pub internal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Local start times (`HH:MM`) for start-time products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_local_start_times: Option<Vec<String>>,
    /// Human readable cutoff, e.g. `1 hour`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_cutoff: Option<String>,
    pub cancellation_cutoff_amount: u32,
    pub cancellation_cutoff_unit: CancellationCutoffUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_contact_fields: Option<Vec<RequiredContactField>>,
    pub restrictions: OptionRestrictions,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ProductOption {
    /// Looks up a unit by id.
    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == unit_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRestrictions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_units: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_units: Option<u32>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// A priced participant category within an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub internal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type")]
    pub kind: UnitType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_contact_fields: Option<Vec<RequiredContactField>>,
    pub restrictions: UnitRestrictions,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRestrictions {
    pub min_age: u32,
    pub max_age: u32,
    pub id_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<u32>,
    pub pax_count: u32,
    /// Unit ids that must be booked alongside this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accompanied_by: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// An optional API feature a supplier may implement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    pub id: String,
    pub revision: u32,
    pub required: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

strict_fields!(Product {
    availability_type => "availabilityType",
    delivery_formats => "deliveryFormats",
    delivery_methods => "deliveryMethods",
    redemption_method => "redemptionMethod",
    options => "options",
});
strict_fields!(ProductOption {
    cancellation_cutoff_unit => "cancellationCutoffUnit",
    required_contact_fields => "requiredContactFields",
    restrictions => "restrictions",
    units => "units",
});
strict_fields!(OptionRestrictions {});
strict_fields!(Unit {
    kind => "type",
    required_contact_fields => "requiredContactFields",
    restrictions => "restrictions",
});
strict_fields!(UnitRestrictions {});
strict_fields!(Capability {});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{decode, encode};
    use serde_json::{json, Value};

    fn raw_products() -> Value {
        let mut raw: Value =
            serde_json::from_str(include_str!("../../tests/responses/products.json")).unwrap();
        raw[0]["color"] = json!("#0077cc");
        raw[0]["options"][0]["restrictions"]["minPaxCount"] = json!(2);
        raw[0]["options"][0]["units"][1]["restrictions"]["notes"] = json!("with an adult");
        raw[0]["options"][0]["units"][0]["pricingFrom"] = json!([{"retail": 4500}]);
        raw
    }

    #[test]
    fn test_products_survive_reencoding() {
        let products: Vec<Product> = decode(raw_products(), false).unwrap();
        let again: Vec<Product> = decode(encode(&products).unwrap(), false).unwrap();

        assert_eq!(again, products);
        assert_eq!(again[0].extra["color"], "#0077cc");
        let option = again[0].default_option().unwrap();
        assert_eq!(option.restrictions.extra["minPaxCount"], 2);
        assert_eq!(option.units[1].restrictions.extra["notes"], "with an adult");
        assert_eq!(option.units[0].extra["pricingFrom"][0]["retail"], 4500);
    }

    #[test]
    fn test_option_survives_reencoding() {
        let mut raw = raw_products()[0]["options"][0].clone();
        raw["units"][0]["type"] = json!("CHILDREN");

        let option: ProductOption = decode(raw, false).unwrap();
        let encoded = encode(&option).unwrap();
        let again: ProductOption = decode(encoded.clone(), false).unwrap();

        assert_eq!(again, option);
        assert_eq!(encoded["units"][0]["type"], "CHILDREN");
        assert_eq!(again.unit("unit_child").unwrap().restrictions.max_quantity, Some(4));
    }

    #[test]
    fn test_capability_keeps_extra_fields() {
        let raw = json!({"id": "octo/pricing", "revision": 1, "required": false, "dependencies": []});

        let capability: Capability = decode(raw.clone(), false).unwrap();

        assert_eq!(capability.extra["dependencies"], json!([]));
        assert_eq!(encode(&capability).unwrap(), raw);
        assert!(decode::<Capability>(raw, true).is_err());
    }
}
