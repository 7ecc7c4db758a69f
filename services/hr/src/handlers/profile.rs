use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrdesk_auth_types::identity::CallerContext;

use crate::domain::types::Employee;
use crate::error::HrServiceError;
use crate::handlers::extract::JsonBody;
use crate::state::AppState;
use crate::usecase::profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: String,
    pub location: String,
    #[serde(serialize_with = "hrdesk_core::serde::to_rfc3339_ms")]
    pub member_since: DateTime<Utc>,
    pub city: String,
    pub country: String,
    pub phone_number: String,
    pub platform_usage_count: i32,
}

impl From<Employee> for ProfileResponse {
    fn from(e: Employee) -> Self {
        let location = e.profile.display_location();
        let p = e.profile;
        Self {
            name: e.username,
            first_name: p.first_name,
            last_name: p.last_name,
            email: e.email,
            bio: p.bio,
            location,
            member_since: e.created_at,
            city: p.city,
            country: p.country,
            phone_number: p.phone_number,
            platform_usage_count: p.platform_usage_count,
        }
    }
}

#[derive(Serialize)]
pub struct ProfileEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub profile: ProfileResponse,
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    caller: CallerContext,
    State(state): State<AppState>,
) -> Result<Json<ProfileEnvelope>, HrServiceError> {
    let usecase = GetProfileUseCase {
        repo: state.employee_repo(),
    };
    let me = usecase.execute(&caller).await?;
    Ok(Json(ProfileEnvelope {
        message: None,
        profile: me.into(),
    }))
}

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
}

pub async fn update_me(
    caller: CallerContext,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateMeBody>,
) -> Result<Json<ProfileEnvelope>, HrServiceError> {
    let usecase = UpdateProfileUseCase {
        repo: state.employee_repo(),
    };
    let me = usecase
        .execute(
            &caller,
            UpdateProfileInput {
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                bio: body.bio,
                phone_number: body.phone_number,
                city: body.city,
                country: body.country,
                location: body.location,
            },
        )
        .await?;
    Ok(Json(ProfileEnvelope {
        message: Some("Profile updated successfully"),
        profile: me.into(),
    }))
}
