use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One unit of work: a brand and a product to look for under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "Brand")]
    pub brand_name: String,

    #[serde(rename = "Name")]
    pub product_name: String,
}

impl SearchRequest {
    pub fn new(brand_name: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
            product_name: product_name.into(),
        }
    }
}

/// A listing entry whose declared name matched the target product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCandidate {
    /// Declared name exactly as the listing page carries it
    pub declared_name: String,

    /// Absolute URL of the product's detail page
    pub detail_link: String,
}

/// Stock signal read from a detail page.
///
/// Only presence of the in-stock marker is read; `Unknown` covers both
/// "out of stock" and "no marker at all". Serializes as `"Available"` or
/// `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    Available,
    #[default]
    Unknown,
}

impl Availability {
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }
}

impl Serialize for Availability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Availability::Available => serializer.serialize_str("Available"),
            Availability::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(match value.as_deref() {
            Some("Available") => Availability::Available,
            _ => Availability::Unknown,
        })
    }
}

/// Persisted result of one successful product match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,

    pub link: String,

    pub price: Option<String>,

    pub availability: Availability,

    #[serde(rename = "Needle Size")]
    pub needle_size: Option<String>,

    #[serde(rename = "Composition")]
    pub composition: Option<String>,

    /// Constant identifying the catalog the record came from
    #[serde(rename = "Website")]
    pub source_site: String,
}
