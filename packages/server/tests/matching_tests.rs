//! Integration tests for the match engine.

mod common;

use std::sync::Arc;

use test_context::test_context;

use common::fixtures::{
    count_matches, create_donor, create_open_request, create_user, match_id_for,
};
use common::TestHarness;
use server_core::common::{DomainError, RequestId};
use server_core::domains::donors::actions::toggle_availability;
use server_core::domains::matching::engine::{run_matching, run_matching_for};
use server_core::domains::matching::BloodGroup;
use server_core::domains::requests::actions::{create_request, NewBloodRequest};
use server_core::domains::requests::models::{BloodRequest, RequestMatch};
use server_core::kernel::test_dependencies::FailingMailer;

#[test_context(TestHarness)]
#[tokio::test]
async fn o_pos_request_matches_local_o_neg_donor_and_notifies_once(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let (donor_user, donor) = create_donor("Asha Kulkarni", BloodGroup::ONeg, "Pune", &ctx.db_pool)
        .await
        .unwrap();
    let (_, request) = create_open_request(BloodGroup::OPos, "Pune", 2, &ctx.db_pool)
        .await
        .unwrap();

    let created = run_matching(&request, &deps).await.unwrap();

    assert_eq!(created, 1);
    assert_eq!(count_matches(request.id, &ctx.db_pool).await.unwrap(), 1);
    assert_eq!(ctx.mailer.sent_count(), 1);
    assert!(ctx.mailer.was_sent_to(&donor_user.email));

    // The invitation carries both action references for this match
    let match_id = match_id_for(request.id, donor.id, &ctx.db_pool).await.unwrap();
    let sent = ctx.mailer.sent();
    assert!(sent[0].body.contains(&format!("/donors/matches/{}/accept", match_id)));
    assert!(sent[0].body.contains(&format!("/donors/matches/{}/reject", match_id)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rerunning_matching_creates_nothing_new(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    create_donor("Ravi Deshmukh", BloodGroup::ONeg, "Pune", &ctx.db_pool)
        .await
        .unwrap();
    let (_, request) = create_open_request(BloodGroup::OPos, "Pune", 1, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(run_matching(&request, &deps).await.unwrap(), 1);
    assert_eq!(run_matching(&request, &deps).await.unwrap(), 0);

    assert_eq!(count_matches(request.id, &ctx.db_pool).await.unwrap(), 1);
    // Only the first run dispatched an invitation
    assert_eq!(ctx.mailer.sent_count(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn requester_is_never_matched_to_their_own_request(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let (donor_user, _) = create_donor("Self Match", BloodGroup::ONeg, "Pune", &ctx.db_pool)
        .await
        .unwrap();

    let request = BloodRequest::create(
        donor_user.id,
        None,
        BloodGroup::OPos,
        1,
        "Pune",
        &donor_user.email,
        &ctx.db_pool,
    )
    .await
    .unwrap();

    assert_eq!(run_matching(&request, &deps).await.unwrap(), 0);
    assert_eq!(count_matches(request.id, &ctx.db_pool).await.unwrap(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn ineligible_donors_are_excluded(ctx: &mut TestHarness) {
    let deps = ctx.deps();

    // Incompatible group for an O- recipient
    create_donor("Wrong Group", BloodGroup::APos, "Pune", &ctx.db_pool)
        .await
        .unwrap();
    // Right group, different city
    create_donor("Wrong City", BloodGroup::ONeg, "Nagpur", &ctx.db_pool)
        .await
        .unwrap();
    // Right group and city, but inactive
    let (inactive_user, _) = create_donor("Inactive Donor", BloodGroup::ONeg, "Pune", &ctx.db_pool)
        .await
        .unwrap();
    toggle_availability(inactive_user.id, &deps).await.unwrap();

    let (_, request) = create_open_request(BloodGroup::ONeg, "Pune", 1, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(run_matching(&request, &deps).await.unwrap(), 0);
    assert_eq!(ctx.mailer.sent_count(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn city_comparison_ignores_case(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    create_donor("Case Donor", BloodGroup::ONeg, "PUNE", &ctx.db_pool)
        .await
        .unwrap();
    let (_, request) = create_open_request(BloodGroup::OPos, "pune", 1, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(run_matching(&request, &deps).await.unwrap(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn failed_invitation_email_still_records_the_match(ctx: &mut TestHarness) {
    let deps = ctx.deps_with_mailer(Arc::new(FailingMailer));
    let (_, donor) = create_donor("Unlucky Mail", BloodGroup::ONeg, "Pune", &ctx.db_pool)
        .await
        .unwrap();
    let (_, request) = create_open_request(BloodGroup::OPos, "Pune", 1, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(run_matching(&request, &deps).await.unwrap(), 1);

    let match_id = match_id_for(request.id, donor.id, &ctx.db_pool).await.unwrap();
    let notified = sqlx::query_scalar::<_, bool>(
        "SELECT notified FROM request_matches WHERE id = $1",
    )
    .bind(match_id)
    .fetch_one(&ctx.db_pool)
    .await
    .unwrap();

    // Match stands, but was never flagged as notified
    assert!(!notified);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn matching_can_be_rerun_by_request_id(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let (_, request) = create_open_request(BloodGroup::OPos, "Pune", 1, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(run_matching_for(request.id, &deps).await.unwrap(), 0);

    // A donor registered after the first run is picked up on the rerun
    create_donor("Late Donor", BloodGroup::ONeg, "Pune", &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(run_matching_for(request.id, &deps).await.unwrap(), 1);
    assert_eq!(count_matches(request.id, &ctx.db_pool).await.unwrap(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn matching_an_unknown_request_id_is_not_found(ctx: &mut TestHarness) {
    let deps = ctx.deps();

    let result = run_matching_for(RequestId::new(), &deps).await;

    assert!(matches!(result, Err(DomainError::NotFound("blood request"))));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn create_request_action_runs_matching_and_defaults_contact(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    create_donor("Auto Match", BloodGroup::ONeg, "Pune", &ctx.db_pool)
        .await
        .unwrap();
    let requester = create_user("Request Creator", &ctx.db_pool).await.unwrap();

    let request_id = create_request(
        NewBloodRequest {
            requested_by: requester.id,
            hospital_id: None,
            blood_group: BloodGroup::OPos,
            units_required: 3,
            city: "pune".to_string(),
            contact_info: None,
        },
        &deps,
    )
    .await
    .unwrap();

    let request = BloodRequest::find_by_id(request_id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(request.city, "Pune");
    assert_eq!(request.contact_info, requester.email);
    assert_eq!(count_matches(request_id, &ctx.db_pool).await.unwrap(), 1);

    let pending = RequestMatch::find_pending_for_user(requester.id, &ctx.db_pool)
        .await
        .unwrap();
    // The requester holds no matches of their own
    assert!(pending.is_empty());
}
