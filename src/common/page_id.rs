//! Page identifier type.

use std::fmt;

use crate::common::config::PAGE_OFFSET_BITS;

/// Identifies a logical (virtual) page.
///
/// Page ids are opaque: the simulator only compares and hashes them.
///
/// # Example
/// ```
/// use vmsim::PageId;
///
/// let page_id = PageId::from_address(0x0041_f7a0);
/// assert_eq!(page_id, PageId::new(0x41f));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u64);

impl PageId {
    /// Create a new PageId.
    #[inline]
    pub fn new(id: u64) -> Self {
        PageId(id)
    }

    /// The page containing a virtual address.
    #[inline]
    pub fn from_address(address: u64) -> Self {
        PageId(address >> PAGE_OFFSET_BITS)
    }
}

impl From<u64> for PageId {
    fn from(id: u64) -> Self {
        PageId(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_new() {
        let pid = PageId::new(42);
        assert_eq!(pid.0, 42);
        assert_eq!(PageId::from(42u64), pid);
    }

    #[test]
    fn test_page_id_from_address() {
        assert_eq!(PageId::from_address(0), PageId::new(0));
        assert_eq!(PageId::from_address(4095), PageId::new(0));
        assert_eq!(PageId::from_address(4096), PageId::new(1));
        assert_eq!(PageId::from_address(0xffff_ffff), PageId::new(0xf_ffff));
    }

    #[test]
    fn test_page_id_display() {
        assert_eq!(format!("{}", PageId::new(42)), "Page(42)");
    }
}
