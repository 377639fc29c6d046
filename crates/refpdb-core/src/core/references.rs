use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of reference conformers published by the DNATCO references endpoint.
pub const REFERENCE_COUNT: usize = 96;

/// Reference conformer codes in the order they are fetched and emitted.
static REFERENCE_CODES: [&str; REFERENCE_COUNT] = [
    "AA00", "AA01", "AA02", "AA03", "AA04", "AA05", "AA06", "AA07",
    "AA08", "AA09", "AA10", "AA11", "AA12", "AA13", "AB01", "AB02",
    "AB03", "AB04", "AB05", "BA01", "BA05", "BA09", "BA08", "BA10",
    "BA13", "BA16", "BA17", "BB00", "BB01", "BB17", "BB02", "BB03",
    "BB11", "BB16", "BB04", "BB05", "BB07", "BB08", "BB10", "BB12",
    "BB13", "BB14", "BB15", "BB20", "IC01", "IC02", "IC03", "IC04",
    "IC05", "IC06", "IC07", "OP01", "OP02", "OP03", "OP04", "OP05",
    "OP06", "OP07", "OP08", "OP09", "OP10", "OP11", "OP12", "OP13",
    "OP14", "OP15", "OP16", "OP17", "OP18", "OP19", "OP20", "OP21",
    "OP22", "OP23", "OP24", "OP25", "OP26", "OP27", "OP28", "OP29",
    "OP30", "OP31", "OPS1", "OP1S", "AAS1", "AB1S", "AB2S", "BB1S",
    "BB2S", "BBS1", "ZZ01", "ZZ02", "ZZ1S", "ZZ2S", "ZZS1", "ZZS2",
];

static REFERENCE_ORDINALS: Map<&'static str, u8> = phf_map! {
    "AA00" => 0, "AA01" => 1, "AA02" => 2, "AA03" => 3, "AA04" => 4, "AA05" => 5,
    "AA06" => 6, "AA07" => 7, "AA08" => 8, "AA09" => 9, "AA10" => 10, "AA11" => 11,
    "AA12" => 12, "AA13" => 13, "AB01" => 14, "AB02" => 15, "AB03" => 16, "AB04" => 17,
    "AB05" => 18, "BA01" => 19, "BA05" => 20, "BA09" => 21, "BA08" => 22, "BA10" => 23,
    "BA13" => 24, "BA16" => 25, "BA17" => 26, "BB00" => 27, "BB01" => 28, "BB17" => 29,
    "BB02" => 30, "BB03" => 31, "BB11" => 32, "BB16" => 33, "BB04" => 34, "BB05" => 35,
    "BB07" => 36, "BB08" => 37, "BB10" => 38, "BB12" => 39, "BB13" => 40, "BB14" => 41,
    "BB15" => 42, "BB20" => 43, "IC01" => 44, "IC02" => 45, "IC03" => 46, "IC04" => 47,
    "IC05" => 48, "IC06" => 49, "IC07" => 50, "OP01" => 51, "OP02" => 52, "OP03" => 53,
    "OP04" => 54, "OP05" => 55, "OP06" => 56, "OP07" => 57, "OP08" => 58, "OP09" => 59,
    "OP10" => 60, "OP11" => 61, "OP12" => 62, "OP13" => 63, "OP14" => 64, "OP15" => 65,
    "OP16" => 66, "OP17" => 67, "OP18" => 68, "OP19" => 69, "OP20" => 70, "OP21" => 71,
    "OP22" => 72, "OP23" => 73, "OP24" => 74, "OP25" => 75, "OP26" => 76, "OP27" => 77,
    "OP28" => 78, "OP29" => 79, "OP30" => 80, "OP31" => 81, "OPS1" => 82, "OP1S" => 83,
    "AAS1" => 84, "AB1S" => 85, "AB2S" => 86, "BB1S" => 87, "BB2S" => 88, "BBS1" => 89,
    "ZZ01" => 90, "ZZ02" => 91, "ZZ1S" => 92, "ZZ2S" => 93, "ZZS1" => 94, "ZZS2" => 95,
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ReferenceError {
    #[error("Unknown reference conformer identifier: '{0}'")]
    Unknown(String),

    #[error("Reference '{0}' is already present in the mapping")]
    Duplicate(ReferenceId),

    #[error("Reference mapping is incomplete, missing: {}", format_ids(.missing))]
    Incomplete { missing: Vec<ReferenceId> },
}

fn format_ids(ids: &[ReferenceId]) -> String {
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A reference conformer identifier, e.g. `AA00` or `ZZS2`.
///
/// Values can only be obtained from the static list, either through [`ReferenceId::all`]
/// or by parsing a code with [`str::parse`]. Ordering follows the static list, not the
/// lexical order of the codes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceId(u8);

impl ReferenceId {
    /// Iterates over every reference identifier in fetch order.
    pub fn all() -> impl ExactSizeIterator<Item = ReferenceId> + DoubleEndedIterator + Clone {
        (0..REFERENCE_COUNT as u8).map(ReferenceId)
    }

    pub fn as_str(self) -> &'static str {
        REFERENCE_CODES[self.0 as usize]
    }

    /// Name of the remote file holding this reference, e.g. `AA00.pdb`.
    pub fn file_name(self) -> String {
        format!("{}.pdb", self.as_str())
    }
}

impl FromStr for ReferenceId {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REFERENCE_ORDINALS
            .get(s)
            .map(|&ordinal| ReferenceId(ordinal))
            .ok_or_else(|| ReferenceError::Unknown(s.to_string()))
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReferenceId({})", self.as_str())
    }
}
