//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly. Emails get a random
//! suffix because all tests share one database.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use server_core::common::{DonorId, MatchId, RequestId};
use server_core::domains::accounts::models::UserAccount;
use server_core::domains::donors::models::{Donor, NewDonor};
use server_core::domains::hospitals::models::Hospital;
use server_core::domains::matching::BloodGroup;
use server_core::domains::requests::models::BloodRequest;

/// Create an identity account with a unique email.
pub async fn create_user(name: &str, pool: &PgPool) -> Result<UserAccount> {
    let email = format!(
        "{}-{}@test.example.org",
        name.to_lowercase().replace(' ', "."),
        Uuid::new_v4().simple()
    );
    Ok(UserAccount::create(&email, name, pool).await?)
}

/// Register an active donor owned by a fresh account.
pub async fn create_donor(
    name: &str,
    blood_group: BloodGroup,
    city: &str,
    pool: &PgPool,
) -> Result<(UserAccount, Donor)> {
    let user = create_user(name, pool).await?;

    let donor = Donor::create(
        NewDonor {
            user_id: user.id,
            first_name: name.split(' ').next().unwrap_or(name).to_string(),
            middle_name: String::new(),
            last_name: name.split(' ').nth(1).unwrap_or("Donor").to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
            phone: "9000000000".to_string(),
            blood_group,
            address: "12 Test Lane".to_string(),
            state: "Maharashtra".to_string(),
            city: city.to_string(),
            pincode: "411001".to_string(),
        },
        pool,
    )
    .await?;

    Ok((user, donor))
}

/// Create a hospital profile owned by a fresh account.
pub async fn create_hospital(name: &str, city: &str, pool: &PgPool) -> Result<(UserAccount, Hospital)> {
    let user = create_user(name, pool).await?;
    let hospital =
        Hospital::create(user.id, name, city, "020-000000", "Front Desk", pool).await?;
    Ok((user, hospital))
}

/// Create an open request owned by a fresh requester account.
pub async fn create_open_request(
    blood_group: BloodGroup,
    city: &str,
    units: i32,
    pool: &PgPool,
) -> Result<(UserAccount, BloodRequest)> {
    let requester = create_user("Request Owner", pool).await?;
    let request = BloodRequest::create(
        requester.id,
        None,
        blood_group,
        units,
        city,
        &requester.email,
        pool,
    )
    .await?;
    Ok((requester, request))
}

/// Look up the match row for a (request, donor) pair.
pub async fn match_id_for(
    request_id: RequestId,
    donor_id: DonorId,
    pool: &PgPool,
) -> Result<MatchId> {
    let id = sqlx::query_scalar::<_, MatchId>(
        "SELECT id FROM request_matches WHERE request_id = $1 AND donor_id = $2",
    )
    .bind(request_id)
    .bind(donor_id)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Count match rows for a request.
pub async fn count_matches(request_id: RequestId, pool: &PgPool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM request_matches WHERE request_id = $1",
    )
    .bind(request_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Count donation rows for a request.
pub async fn count_donations(request_id: RequestId, pool: &PgPool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM donor_donations WHERE request_id = $1",
    )
    .bind(request_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}
