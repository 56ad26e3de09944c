//! Email composition for the matching flows.
//!
//! Pure (subject, body) builders; the engine and actions decide where to
//! send them. The acceptance notice is the only message that carries donor
//! contact details.

use crate::domains::donors::models::Donor;
use crate::domains::requests::models::BloodRequest;

/// Invitation sent to each newly matched donor, with single-use accept and
/// reject action references.
pub fn match_invitation(
    request: &BloodRequest,
    accept_link: &str,
    reject_link: &str,
) -> (String, String) {
    let subject = format!(
        "Blood request matching your blood group ({})",
        request.blood_group
    );
    let body = format!(
        "Blood Group: {}\nCity: {}\nUnits Required: {}\n\nAccept: {}\nReject: {}\n",
        request.blood_group, request.city, request.units_required, accept_link, reject_link
    );
    (subject, body)
}

/// Sent to the hospital or requester when a donor accepts. Contact details
/// are shared only here.
pub fn acceptance_notice(
    donor: &Donor,
    donor_email: &str,
    request: &BloodRequest,
) -> (String, String) {
    let subject = format!("Donor accepted your blood request ({})", request.blood_group);
    let body = format!(
        "Donor Name: {}\nDonor Phone: {}\nDonor Email: {}\n\nBlood Group: {}\nCity: {}\nUnits Required: {}\n",
        donor.full_name(),
        donor.phone,
        donor_email,
        request.blood_group,
        request.city,
        request.units_required
    );
    (subject, body)
}

pub fn request_cancelled(request: &BloodRequest) -> (String, String) {
    let subject = format!("Blood Request Cancelled ({})", request.blood_group);
    let body = format!(
        "The blood request in {} has been cancelled.\n",
        request.city
    );
    (subject, body)
}

pub fn request_fulfilled(request: &BloodRequest) -> (String, String) {
    let subject = format!("Blood Request Fulfilled ({})", request.blood_group);
    let body = "Thank you for helping. The request has been fulfilled.\n".to_string();
    (subject, body)
}
