// src/models/oposicion.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The exam tracks served by the platform.
///
/// This is a closed set: adding a track means adding a variant here and
/// extending the `position_type` mapping, so an unrecognized key is
/// rejected when it is parsed rather than silently matching nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Oposicion {
    #[serde(rename = "auxiliar-administrativo-estado")]
    AuxiliarAdministrativoEstado,
    #[serde(rename = "administrativo-estado")]
    AdministrativoEstado,
    #[serde(rename = "tramitacion-procesal")]
    TramitacionProcesal,
    #[serde(rename = "auxilio-judicial")]
    AuxilioJudicial,
}

/// Internal discriminator used by the topic catalog.
/// Stored as text in the `topics.position_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionType {
    AuxiliarAdministrativo,
    Administrativo,
    TramitacionProcesal,
    AuxilioJudicial,
}

impl Oposicion {
    pub const ALL: [Oposicion; 4] = [
        Oposicion::AuxiliarAdministrativoEstado,
        Oposicion::AdministrativoEstado,
        Oposicion::TramitacionProcesal,
        Oposicion::AuxilioJudicial,
    ];

    /// URL/wire key for this track.
    pub fn as_key(self) -> &'static str {
        match self {
            Oposicion::AuxiliarAdministrativoEstado => "auxiliar-administrativo-estado",
            Oposicion::AdministrativoEstado => "administrativo-estado",
            Oposicion::TramitacionProcesal => "tramitacion-procesal",
            Oposicion::AuxilioJudicial => "auxilio-judicial",
        }
    }

    /// Maps the track to its catalog discriminator. Exhaustive on purpose.
    pub fn position_type(self) -> PositionType {
        match self {
            Oposicion::AuxiliarAdministrativoEstado => PositionType::AuxiliarAdministrativo,
            Oposicion::AdministrativoEstado => PositionType::Administrativo,
            Oposicion::TramitacionProcesal => PositionType::TramitacionProcesal,
            Oposicion::AuxilioJudicial => PositionType::AuxilioJudicial,
        }
    }
}

impl fmt::Display for Oposicion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for Oposicion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auxiliar-administrativo-estado" => Ok(Oposicion::AuxiliarAdministrativoEstado),
            "administrativo-estado" => Ok(Oposicion::AdministrativoEstado),
            "tramitacion-procesal" => Ok(Oposicion::TramitacionProcesal),
            "auxilio-judicial" => Ok(Oposicion::AuxilioJudicial),
            other => Err(format!("Unknown oposicion key: {}", other)),
        }
    }
}

impl PositionType {
    /// Text form stored in `topics.position_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            PositionType::AuxiliarAdministrativo => "auxiliar_administrativo",
            PositionType::Administrativo => "administrativo",
            PositionType::TramitacionProcesal => "tramitacion_procesal",
            PositionType::AuxilioJudicial => "auxilio_judicial",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_track_round_trips_through_its_key() {
        for op in Oposicion::ALL {
            assert_eq!(op.as_key().parse::<Oposicion>(), Ok(op));
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!("gestion-procesal".parse::<Oposicion>().is_err());
        assert!("".parse::<Oposicion>().is_err());
    }
}
