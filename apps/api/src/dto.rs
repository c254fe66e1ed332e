use serde::{Deserialize, Serialize};
use ts_rs::TS;
use venue_application::{
    CreateLocationInput, CreateTableInput, UpdateLocationInput, UpdateTableInput,
};
use venue_core::AppError;
use venue_domain::{Location, Table, TableStatus};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub storage: &'static str,
}

/// Plain acknowledgement payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/message-response.ts"
)]
pub struct MessageResponse {
    pub message: String,
}

/// Incoming payload for location creation.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-location-request.ts"
)]
pub struct CreateLocationRequest {
    pub code: String,
    pub name: String,
    pub address: String,
}

/// Incoming payload for partial location updates.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-location-request.ts"
)]
pub struct UpdateLocationRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

/// API representation of a location.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/location-response.ts"
)]
pub struct LocationResponse {
    pub id: String,
    pub code: String,
    pub name: String,
    pub address: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Incoming payload for table creation.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-table-request.ts"
)]
pub struct CreateTableRequest {
    pub location_id: String,
    pub code: String,
    pub seats: i32,
}

/// Incoming payload for partial table updates.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-table-request.ts"
)]
pub struct UpdateTableRequest {
    pub code: Option<String>,
    pub seats: Option<i32>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
}

/// Incoming payload for status-only table updates.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-table-status-request.ts"
)]
pub struct UpdateTableStatusRequest {
    pub status: String,
}

/// API representation of a table.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/table-response.ts"
)]
pub struct TableResponse {
    pub id: String,
    pub location_id: String,
    pub code: String,
    pub seats: u8,
    pub status: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CreateLocationRequest> for CreateLocationInput {
    fn from(value: CreateLocationRequest) -> Self {
        Self {
            code: value.code,
            name: value.name,
            address: value.address,
        }
    }
}

impl From<UpdateLocationRequest> for UpdateLocationInput {
    fn from(value: UpdateLocationRequest) -> Self {
        Self {
            code: value.code,
            name: value.name,
            address: value.address,
            is_active: value.is_active,
        }
    }
}

impl From<Location> for LocationResponse {
    fn from(value: Location) -> Self {
        let timestamps = value.timestamps();
        Self {
            id: value.id().as_str().to_owned(),
            code: value.code().as_str().to_owned(),
            name: value.name().as_str().to_owned(),
            address: value.address().as_str().to_owned(),
            is_active: value.is_active(),
            created_at: timestamps.created_at.to_rfc3339(),
            updated_at: timestamps.updated_at.to_rfc3339(),
        }
    }
}

impl From<CreateTableRequest> for CreateTableInput {
    fn from(value: CreateTableRequest) -> Self {
        Self {
            location_id: value.location_id,
            code: value.code,
            seats: i64::from(value.seats),
        }
    }
}

impl TryFrom<UpdateTableRequest> for UpdateTableInput {
    type Error = AppError;

    fn try_from(value: UpdateTableRequest) -> Result<Self, Self::Error> {
        let status = value
            .status
            .filter(|status| !status.trim().is_empty())
            .map(|status| TableStatus::parse(status.trim()))
            .transpose()?;

        Ok(Self {
            code: value.code,
            seats: value.seats.map(i64::from),
            status,
            is_active: value.is_active,
        })
    }
}

impl From<Table> for TableResponse {
    fn from(value: Table) -> Self {
        let timestamps = value.timestamps();
        Self {
            id: value.id().as_str().to_owned(),
            location_id: value.location_id().as_str().to_owned(),
            code: value.code().as_str().to_owned(),
            seats: value.seats().get(),
            status: value.status().as_str().to_owned(),
            is_active: value.is_active(),
            created_at: timestamps.created_at.to_rfc3339(),
            updated_at: timestamps.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ts_rs::Config;
    use ts_rs::TS;
    use venue_application::UpdateTableInput;
    use venue_domain::TableStatus;

    use super::{
        CreateLocationRequest, CreateTableRequest, HealthResponse, LocationResponse,
        MessageResponse, TableResponse, UpdateLocationRequest, UpdateTableRequest,
        UpdateTableStatusRequest,
    };
    use crate::error::ErrorResponse;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        CreateLocationRequest::export(&config)?;
        UpdateLocationRequest::export(&config)?;
        LocationResponse::export(&config)?;
        CreateTableRequest::export(&config)?;
        UpdateTableRequest::export(&config)?;
        UpdateTableStatusRequest::export(&config)?;
        TableResponse::export(&config)?;
        MessageResponse::export(&config)?;
        ErrorResponse::export(&config)?;
        HealthResponse::export(&config)?;

        Ok(())
    }

    #[test]
    fn table_update_ignores_blank_status_and_rejects_unknown_ones() {
        let blank = UpdateTableInput::try_from(UpdateTableRequest {
            status: Some("  ".to_owned()),
            ..UpdateTableRequest::default()
        });
        assert!(blank.is_ok_and(|input| input.status.is_none()));

        let legacy = UpdateTableInput::try_from(UpdateTableRequest {
            status: Some("free".to_owned()),
            ..UpdateTableRequest::default()
        });
        assert!(legacy.is_ok_and(|input| input.status == Some(TableStatus::Available)));

        let unknown = UpdateTableInput::try_from(UpdateTableRequest {
            status: Some("broken".to_owned()),
            ..UpdateTableRequest::default()
        });
        assert!(unknown.is_err());
    }
}
