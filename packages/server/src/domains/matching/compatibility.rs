//! Static donor compatibility table.
//!
//! Directed mapping from the requested group to the donor groups eligible
//! to give to it. Immutable medical configuration: O- is the universal
//! donor, AB+ the universal recipient.

use super::blood_group::BloodGroup;
use BloodGroup::*;

/// Donor groups whose blood a recipient of `requested` can receive.
pub fn compatible_donors(requested: BloodGroup) -> &'static [BloodGroup] {
    match requested {
        ONeg => &[ONeg],
        OPos => &[ONeg, OPos],
        ANeg => &[ONeg, ANeg],
        APos => &[ONeg, OPos, ANeg, APos],
        BNeg => &[ONeg, BNeg],
        BPos => &[ONeg, OPos, BNeg, BPos],
        AbNeg => &[ONeg, ANeg, BNeg, AbNeg],
        AbPos => &[ONeg, OPos, ANeg, APos, BNeg, BPos, AbNeg, AbPos],
    }
}
