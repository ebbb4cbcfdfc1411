//! Build file serialization

use std::path::{Path, PathBuf};

use glam::DVec3;
use pk_kernel::Solid;
use pk_parts::{
    ClaspParams, FilletCubeParams, HexBoltParams, HexNutParams, HingeParams, NutCoreParams,
    NutTrapParams, ScaffoldParams, ThreadParams, WedgeParams, WedgeTrimParams, WingNutParams,
    clasp, fillet_cube, hex_bolt, hex_nut, hinge, nut_core, nut_trap, nut_trap_slot, polycube,
    support_hinge, support_scaffold, thread_segment, wedge, wedge_trim, wing_nut,
};
use serde::{Deserialize, Serialize};

/// A set of parts to render, as read from a `.ron` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildFile {
    /// Directory the STL files are written to, relative to the working directory
    pub output_dir: PathBuf,
    /// Evaluation kernel name (see [`pk_kernel::kernel_by_name`])
    pub kernel: String,
    pub parts: Vec<NamedPart>,
}

impl Default for BuildFile {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            kernel: "bsp".to_string(),
            parts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPart {
    /// Output file stem
    pub name: String,
    pub part: PartSpec,
}

impl NamedPart {
    pub fn new(name: impl Into<String>, part: PartSpec) -> Self {
        Self {
            name: name.into(),
            part,
        }
    }
}

/// One generator call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PartSpec {
    Thread(ThreadParams),
    NutCore(NutCoreParams),
    HexBolt(HexBoltParams),
    HexNut(HexNutParams),
    WingNut(WingNutParams),
    FilletCube(FilletCubeParams),
    Scaffold(ScaffoldParams),
    /// Both leaves in place
    Hinge(HingeParams),
    SupportHinge {
        hinge: HingeParams,
        scaffold: ScaffoldParams,
    },
    /// Hook and catch in latched position
    Clasp(ClaspParams),
    Wedge(WedgeParams),
    Polycube {
        corners: [DVec3; 8],
    },
    NutTrap(NutTrapParams),
    NutTrapSlot {
        trap: NutTrapParams,
        slot_length: f64,
    },
    /// Another part with chamfers cut along some of its edges
    Trimmed {
        base: Box<PartSpec>,
        trims: Vec<WedgeTrimParams>,
    },
}

impl PartSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            PartSpec::Thread(_) => "thread",
            PartSpec::NutCore(_) => "nut core",
            PartSpec::HexBolt(_) => "hex bolt",
            PartSpec::HexNut(_) => "hex nut",
            PartSpec::WingNut(_) => "wing nut",
            PartSpec::FilletCube(_) => "fillet cube",
            PartSpec::Scaffold(_) => "scaffold",
            PartSpec::Hinge(_) => "hinge",
            PartSpec::SupportHinge { .. } => "supported hinge",
            PartSpec::Clasp(_) => "clasp",
            PartSpec::Wedge(_) => "wedge",
            PartSpec::Polycube { .. } => "polycube",
            PartSpec::NutTrap(_) => "nut trap",
            PartSpec::NutTrapSlot { .. } => "nut trap slot",
            PartSpec::Trimmed { .. } => "trimmed part",
        }
    }

    pub fn build(&self) -> Solid {
        match self {
            PartSpec::Thread(p) => thread_segment(p),
            PartSpec::NutCore(p) => nut_core(p),
            PartSpec::HexBolt(p) => hex_bolt(p),
            PartSpec::HexNut(p) => hex_nut(p),
            PartSpec::WingNut(p) => wing_nut(p),
            PartSpec::FilletCube(p) => fillet_cube(p),
            PartSpec::Scaffold(p) => support_scaffold(p),
            PartSpec::Hinge(p) => hinge(p).assembled(),
            PartSpec::SupportHinge { hinge, scaffold } => {
                support_hinge(hinge, scaffold).assembled()
            }
            PartSpec::Clasp(p) => clasp(p).assembled(),
            PartSpec::Wedge(p) => wedge(p),
            PartSpec::Polycube { corners } => polycube(*corners),
            PartSpec::NutTrap(p) => nut_trap(p),
            PartSpec::NutTrapSlot { trap, slot_length } => nut_trap_slot(trap, *slot_length),
            PartSpec::Trimmed { base, trims } => trims
                .iter()
                .fold(base.build(), |solid, trim| wedge_trim(solid, trim)),
        }
    }

    /// Thread carried by this part, if any
    pub fn thread_params(&self) -> Option<ThreadParams> {
        match self {
            PartSpec::Thread(p) => Some(*p),
            PartSpec::NutCore(p) => Some(p.bore_thread()),
            PartSpec::HexBolt(p) => Some(p.thread_params()),
            PartSpec::HexNut(p) => Some(p.core_params().bore_thread()),
            PartSpec::WingNut(p) => Some(p.core_params().bore_thread()),
            PartSpec::Trimmed { base, .. } => base.thread_params(),
            _ => None,
        }
    }
}

impl BuildFile {
    /// Load a build file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron()?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Build file errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let file = BuildFile::from_ron("(parts: [])").unwrap();
        assert_eq!(file.kernel, "bsp");
        assert_eq!(file.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_parse_part_list() {
        let file = BuildFile::from_ron(
            r#"(
                output_dir: "stl",
                parts: [
                    (name: "m6", part: HexBolt((diameter: 6.0, pitch: 1.0, length: 16.0))),
                    (name: "block", part: FilletCube((radius: 1.0))),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(file.parts.len(), 2);
        let PartSpec::HexBolt(bolt) = &file.parts[0].part else {
            panic!("expected bolt");
        };
        assert_eq!(bolt.diameter, 6.0);
        assert_eq!(bolt.segments_per_turn, 50);
        assert_eq!(file.parts[1].part.kind(), "fillet cube");
    }

    #[test]
    fn test_bad_input_is_reported() {
        let err = BuildFile::from_ron("(parts: [(name: 3)])").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize(_)));
    }

    #[test]
    fn test_thread_params_follow_part() {
        let nut = PartSpec::HexNut(HexNutParams::default());
        let thread = nut.thread_params().unwrap();
        assert!(thread.diameter_adjust > 0.0);
        assert!(PartSpec::Wedge(WedgeParams::default()).thread_params().is_none());

        let trimmed = PartSpec::Trimmed {
            base: Box::new(PartSpec::Thread(ThreadParams::default())),
            trims: Vec::new(),
        };
        assert_eq!(trimmed.thread_params(), Some(ThreadParams::default()));
    }
}
