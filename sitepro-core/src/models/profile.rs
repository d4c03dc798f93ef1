use std::fmt::{self, Display};

use crate::models::Site;

///
/// Format one signal value the way dump files expect it: shortest round-trip
/// digits, integral values keep a trailing `.0`, missing values print as
/// `nan`. Magnitudes below `1e-4` or from `1e16` up switch to scientific
/// notation with a signed, at least two digit exponent (`1e-05`, `1.5e+16`).
///
pub fn format_signal(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return scientific(value);
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        plain + ".0"
    }
}

fn scientific(value: f64) -> String {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

///
/// The binned profile of one retained site, already oriented.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SiteProfile {
    pub site: Site,
    pub values: Vec<f64>,
}

impl SiteProfile {
    pub fn new(site: Site, values: Vec<f64>) -> Self {
        SiteProfile { site, values }
    }

    /// Comma joined values in bin order.
    pub fn values_as_string(&self) -> String {
        self.values
            .iter()
            .map(|v| format_signal(*v))
            .collect::<Vec<String>>()
            .join(",")
    }

    ///
    /// One dump line (without trailing newline).
    ///
    pub fn as_string(&self) -> String {
        format!("{}\t{}", self.site.as_string(), self.values_as_string())
    }
}

impl AsRef<[f64]> for SiteProfile {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl Display for SiteProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
