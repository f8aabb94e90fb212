//! The 2004-2019 French European Parliament constituencies and the fixed
//! department-to-constituency table used to assemble their boundaries.

use crate::error::ImportError;

/// One of the eight French European Parliament constituencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constituency {
    Est,
    IleDeFrance,
    MassifCentralCentre,
    NordOuest,
    Ouest,
    OutreMer,
    SudEst,
    SudOuest,
}

impl Constituency {
    /// Slug stored as the area's `eur` code.
    pub fn slug(&self) -> &'static str {
        match self {
            Constituency::Est => "est",
            Constituency::IleDeFrance => "ile-de-france",
            Constituency::MassifCentralCentre => "massif-central-centre",
            Constituency::NordOuest => "nord-ouest",
            Constituency::Ouest => "ouest",
            Constituency::OutreMer => "outre-mer",
            Constituency::SudEst => "sud-est",
            Constituency::SudOuest => "sud-ouest",
        }
    }

    /// Display name stored as the area's name.
    pub fn name(&self) -> &'static str {
        match self {
            Constituency::Est => "Est",
            Constituency::IleDeFrance => "Île-de-France",
            Constituency::MassifCentralCentre => "Massif Central-Centre",
            Constituency::NordOuest => "Nord-Ouest",
            Constituency::Ouest => "Ouest",
            Constituency::OutreMer => "Outre-Mer",
            Constituency::SudEst => "Sud-Est",
            Constituency::SudOuest => "Sud-Ouest",
        }
    }

    pub fn all() -> &'static [Constituency] {
        &[
            Constituency::Est,
            Constituency::IleDeFrance,
            Constituency::MassifCentralCentre,
            Constituency::NordOuest,
            Constituency::Ouest,
            Constituency::OutreMer,
            Constituency::SudEst,
            Constituency::SudOuest,
        ]
    }

    /// Map a normalised INSEE department code to its constituency.
    ///
    /// Metropolitan Lyon and the Rhône department share `69`; the source
    /// data distinguishes them as `69M` and `69D`. Corsica is `2A`/`2B`,
    /// and the overseas departments (`971`-`976`) form Outre-Mer.
    pub fn for_department(code: &str) -> Result<Constituency, ImportError> {
        use Constituency::*;
        let constituency = match code {
            "8" | "10" | "21" | "25" | "39" | "51" | "52" | "54" | "55" | "57" | "58" | "67"
            | "68" | "70" | "71" | "88" | "89" | "90" => Est,
            "75" | "77" | "78" | "91" | "92" | "93" | "94" | "95" => IleDeFrance,
            "3" | "15" | "18" | "19" | "23" | "28" | "36" | "37" | "41" | "43" | "45" | "63"
            | "87" => MassifCentralCentre,
            "2" | "14" | "27" | "50" | "59" | "60" | "61" | "62" | "76" | "80" => NordOuest,
            "16" | "17" | "22" | "29" | "35" | "44" | "49" | "53" | "56" | "72" | "79" | "85"
            | "86" => Ouest,
            "971" | "972" | "973" | "974" | "976" => OutreMer,
            "1" | "4" | "5" | "6" | "7" | "13" | "26" | "38" | "42" | "73" | "74" | "83" | "84"
            | "2A" | "2B" | "69D" | "69M" => SudEst,
            "9" | "11" | "12" | "24" | "30" | "31" | "32" | "33" | "34" | "40" | "46" | "47"
            | "48" | "64" | "65" | "66" | "81" | "82" => SudOuest,
            _ => return Err(ImportError::UnknownDepartment(code.to_string())),
        };
        Ok(constituency)
    }
}

/// Strip the leading zeros INSEE codes carry in some datasets (`04` -> `4`).
pub fn normalize_insee(code: &str) -> &str {
    code.trim_start_matches('0')
}
