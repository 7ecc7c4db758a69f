use chrono::Utc;

use hrdesk_auth_types::identity::CallerContext;

use crate::domain::repository::EmployeeRepository;
use crate::domain::types::Employee;
use crate::error::HrServiceError;

pub struct GetProfileUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, caller: &CallerContext) -> Result<Employee, HrServiceError> {
        self.repo
            .find_by_id(caller.user_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)
    }
}

#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
}

pub struct UpdateProfileUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> UpdateProfileUseCase<R> {
    /// Apply the fields that are present. Setting `first_name` also renames the
    /// account to "first last", or just "first" when no last name is sent.
    pub async fn execute(
        &self,
        caller: &CallerContext,
        input: UpdateProfileInput,
    ) -> Result<Employee, HrServiceError> {
        let mut me = self
            .repo
            .find_by_id(caller.user_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;

        if let Some(email) = input.email {
            let email = email.trim().to_owned();
            if email.is_empty() {
                return Err(HrServiceError::MissingData);
            }
            if email != me.email
                && self
                    .repo
                    .identity_taken(Some(&email), None, None, Some(me.id))
                    .await?
            {
                return Err(HrServiceError::EmployeeAlreadyExists);
            }
            me.email = email;
        }

        if let Some(ref first) = input.first_name {
            me.username = match input.last_name.as_deref().map(str::trim) {
                Some(last) if !last.is_empty() => format!("{first} {last}"),
                _ => first.clone(),
            };
        }

        let profile = &mut me.profile;
        let fields = [
            (input.first_name, &mut profile.first_name),
            (input.last_name, &mut profile.last_name),
            (input.bio, &mut profile.bio),
            (input.phone_number, &mut profile.phone_number),
            (input.city, &mut profile.city),
            (input.country, &mut profile.country),
            (input.location, &mut profile.location),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }

        me.updated_at = Utc::now();
        self.repo.update(&me).await?;
        Ok(me)
    }
}
