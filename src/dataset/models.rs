use std::{ops::Deref, sync::Arc};

use serde::{Deserialize, Serialize};

pub const NO_CAPITAL: &str = "no capital";
pub const NO_CURRENCY: &str = "no currency";
pub const NO_POPULATION: &str = "0";
pub const NO_FLAG_IMAGE: &str = "no flag image";
pub const NO_AUDIO: &str = "no audio";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSource {
    Wikidata,
    Dbpedia,
}

impl DatasetSource {
    pub fn endpoint(&self) -> &'static str {
        match self {
            DatasetSource::Wikidata => "https://query.wikidata.org/sparql",
            DatasetSource::Dbpedia => "https://dbpedia.org/sparql",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    pub name: String,
    pub capital: String,
    pub currency: String,
    pub population: String,
    pub flag_image_url: String,
    pub anthem_audio_url: String,
}

impl CountryRecord {
    /// Normalizes one SPARQL binding. Returns `None` for bindings that are
    /// nameless or whose capital was determined by the disfavored method.
    pub fn from_binding(binding: CountryBinding, disfavored_method: &str) -> Option<Self> {
        if binding
            .determination_method_label
            .as_ref()
            .is_some_and(|method| method.value == disfavored_method)
        {
            return None;
        }

        let name = present(binding.country_label)?;

        Some(Self {
            name,
            capital: present(binding.capital_label).unwrap_or_else(|| NO_CAPITAL.into()),
            currency: present(binding.currency_label).unwrap_or_else(|| NO_CURRENCY.into()),
            population: present(binding.population).unwrap_or_else(|| NO_POPULATION.into()),
            flag_image_url: present(binding.flag_image).unwrap_or_else(|| NO_FLAG_IMAGE.into()),
            anthem_audio_url: present(binding.anthem_audio).unwrap_or_else(|| NO_AUDIO.into()),
        })
    }

    pub fn has_anthem(&self) -> bool {
        self.anthem_audio_url != NO_AUDIO
    }
}

fn present(value: Option<BindingValue>) -> Option<String> {
    value.map(|v| v.value).filter(|v| !v.is_empty())
}

/// Immutable snapshot of the fetched countries, shared by every request.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<Vec<CountryRecord>>,
}

impl Dataset {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }
}

impl Deref for Dataset {
    type Target = [CountryRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    pub results: SparqlResults,
}

#[derive(Debug, Deserialize)]
pub struct SparqlResults {
    pub bindings: Vec<CountryBinding>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CountryBinding {
    pub country_label: Option<BindingValue>,
    pub capital_label: Option<BindingValue>,
    pub currency_label: Option<BindingValue>,
    pub population: Option<BindingValue>,
    pub flag_image: Option<BindingValue>,
    pub anthem_audio: Option<BindingValue>,
    pub determination_method_label: Option<BindingValue>,
}

#[derive(Debug, Deserialize)]
pub struct BindingValue {
    pub value: String,
}
