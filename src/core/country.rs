//! The closed six-country registry
//!
//! The model covers Chinese rail development in continental Southeast Asia;
//! the country set is fixed by the input data. Adding a country is a change
//! to this registry, not to the calculation code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::CalcError;

/// A country participating in the trade model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Cambodia,
    China,
    LaoPDR,
    Myanmar,
    Thailand,
    Vietnam,
}

impl Country {
    /// All countries, in canonical table order
    pub const ALL: [Country; 6] = [
        Country::Cambodia,
        Country::China,
        Country::LaoPDR,
        Country::Myanmar,
        Country::Thailand,
        Country::Vietnam,
    ];

    /// The country name as it appears in table keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Cambodia => "Cambodia",
            Country::China => "China",
            Country::LaoPDR => "LaoPDR",
            Country::Myanmar => "Myanmar",
            Country::Thailand => "Thailand",
            Country::Vietnam => "Vietnam",
        }
    }

    /// Label of this country's electricity unit process, used both as a row
    /// of the electricity_generation phase and as a requirement column
    pub fn electricity_process(&self) -> &'static str {
        match self {
            Country::Cambodia => "electricity_Cambodia_kWh",
            Country::China => "electricity_China_kWh",
            Country::LaoPDR => "electricity_LaoPDR_kWh",
            Country::Myanmar => "electricity_Myanmar_kWh",
            Country::Thailand => "electricity_Thailand_kWh",
            Country::Vietnam => "electricity_Vietnam_kWh",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Country::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CalcError::UnknownCountry(s.to_string()))
    }
}
