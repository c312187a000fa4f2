use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Load,
    Store,
    Modify,
    InstructionFetch,
}

impl OperationKind {
    /// Cache accesses one operation of this kind performs.
    pub fn sub_accesses(self) -> usize {
        match self {
            OperationKind::Load | OperationKind::Store => 1,
            OperationKind::Modify => 2,
            OperationKind::InstructionFetch => 0,
        }
    }

    pub fn letter(self) -> char {
        match self {
            OperationKind::Load => 'L',
            OperationKind::Store => 'S',
            OperationKind::Modify => 'M',
            OperationKind::InstructionFetch => 'I',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'L' => Some(OperationKind::Load),
            'S' => Some(OperationKind::Store),
            'M' => Some(OperationKind::Modify),
            'I' => Some(OperationKind::InstructionFetch),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OperationRecord {
    pub kind: OperationKind,
    pub address: u64,
}

impl OperationRecord {
    pub fn new(kind: OperationKind, address: u64) -> Self {
        Self { kind, address }
    }

    pub fn load(address: u64) -> Self {
        Self::new(OperationKind::Load, address)
    }

    pub fn store(address: u64) -> Self {
        Self::new(OperationKind::Store, address)
    }

    pub fn modify(address: u64) -> Self {
        Self::new(OperationKind::Modify, address)
    }

    pub fn fetch(address: u64) -> Self {
        Self::new(OperationKind::InstructionFetch, address)
    }
}

impl AsRef<OperationRecord> for OperationRecord {
    fn as_ref(&self) -> &OperationRecord {
        self
    }
}
