//! Fixed set of administrators allowed to vote on checkpoints.

use crate::{types::Address, Error};

/// Immutable, ordered set of administrators.
///
/// Membership is fixed at construction. [Committee::all] returns administrators in the order they
/// were supplied.
#[derive(Clone, Debug)]
pub struct Committee {
    admins: Vec<Address>,
    sorted: Vec<Address>,
}

impl Committee {
    /// Create a new [Committee].
    ///
    /// Returns an error if `admins` is empty or contains the same [Address] twice.
    pub fn new(admins: Vec<Address>) -> Result<Self, Error> {
        if admins.is_empty() {
            return Err(Error::EmptyCommittee);
        }
        let mut sorted = admins.clone();
        sorted.sort();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::DuplicateAdmin(pair[0]));
        }
        Ok(Self { admins, sorted })
    }

    /// Returns whether `address` is an administrator.
    pub fn is_member(&self, address: &Address) -> bool {
        self.sorted.binary_search(address).is_ok()
    }

    /// Returns all administrators, in the order they were supplied.
    pub fn all(&self) -> &[Address] {
        &self.admins
    }

    /// Returns the number of administrators.
    pub fn len(&self) -> usize {
        self.admins.len()
    }

    /// Always `false`: a [Committee] cannot be constructed without members.
    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ADDRESS_LENGTH;

    fn address(byte: u8) -> Address {
        Address::new([byte; ADDRESS_LENGTH])
    }

    #[test]
    fn test_membership() {
        let committee = Committee::new(vec![address(3), address(1), address(2)]).unwrap();
        assert_eq!(committee.len(), 3);
        assert!(!committee.is_empty());
        assert!(committee.is_member(&address(1)));
        assert!(committee.is_member(&address(2)));
        assert!(committee.is_member(&address(3)));
        assert!(!committee.is_member(&address(0)));
        assert!(!committee.is_member(&address(4)));
    }

    #[test]
    fn test_insertion_order() {
        let admins = vec![address(9), address(1), address(5)];
        let committee = Committee::new(admins.clone()).unwrap();
        assert_eq!(committee.all(), admins.as_slice());
    }

    #[test]
    fn test_empty() {
        assert_eq!(Committee::new(vec![]).unwrap_err(), Error::EmptyCommittee);
    }

    #[test]
    fn test_duplicate() {
        let result = Committee::new(vec![address(1), address(2), address(1)]);
        assert_eq!(result.unwrap_err(), Error::DuplicateAdmin(address(1)));
    }
}
