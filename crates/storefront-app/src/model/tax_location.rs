/// Where tax is assessed. An empty location means "no particular place".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxLocation {
    pub country_iso: Option<String>,
    pub state_id: Option<u32>,
}

impl TaxLocation {
    pub fn new(country_iso: Option<String>, state_id: Option<u32>) -> Self {
        Self {
            country_iso,
            state_id,
        }
    }
}
