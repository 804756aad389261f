//! A single memory access from a trace.

use std::fmt;
use std::str::FromStr;

use crate::common::PageId;

/// Whether an access reads or writes its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    Read,
    Write,
}

impl AccessKind {
    /// Whether a page loaded for this access starts out dirty.
    #[inline]
    pub fn dirties(self) -> bool {
        matches!(self, AccessKind::Write)
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::Read => write!(f, "read"),
            AccessKind::Write => write!(f, "write"),
        }
    }
}

impl FromStr for AccessKind {
    type Err = ();

    /// Parses the trace operation letter (`R`/`W`, any case).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "R" | "r" => Ok(AccessKind::Read),
            "W" | "w" => Ok(AccessKind::Write),
            _ => Err(()),
        }
    }
}

/// One (operation, page) pair fed to an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Access {
    pub kind: AccessKind,
    pub page: PageId,
}

impl Access {
    pub fn read(page: PageId) -> Self {
        Self {
            kind: AccessKind::Read,
            page,
        }
    }

    pub fn write(page: PageId) -> Self {
        Self {
            kind: AccessKind::Write,
            page,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_kind_from_str() {
        assert_eq!("R".parse::<AccessKind>(), Ok(AccessKind::Read));
        assert_eq!("w".parse::<AccessKind>(), Ok(AccessKind::Write));
        assert!("X".parse::<AccessKind>().is_err());
        assert!("RW".parse::<AccessKind>().is_err());
    }

    #[test]
    fn test_only_writes_dirty() {
        assert!(AccessKind::Write.dirties());
        assert!(!AccessKind::Read.dirties());
    }

    #[test]
    fn test_access_constructors() {
        let a = Access::write(PageId::new(7));
        assert_eq!(a.kind, AccessKind::Write);
        assert_eq!(a.page, PageId::new(7));
        assert_eq!(format!("{}", Access::read(PageId::new(3))), "read Page(3)");
    }
}
