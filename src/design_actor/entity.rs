use chrono::Utc;
use serde::Deserialize;

use super::DesignError;
use crate::actor_framework::Entity;
use crate::domain::{
    CustomDesign, CustomDesignCreate, DesignSubmission, SubmissionCreate, SubmissionStatus,
};

fn required(field: &str, value: &str) -> Result<(), DesignError> {
    if value.trim().is_empty() {
        return Err(DesignError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomDesignPatch {
    pub name: Option<String>,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
}

impl Entity for CustomDesign {
    type Id = String;
    type CreatePayload = CustomDesignCreate;
    type Patch = CustomDesignPatch;
    type Action = ();
    type ActionResult = ();
    type Error = DesignError;

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, params: CustomDesignCreate) -> Result<Self, DesignError> {
        required("name", &params.name)?;
        required("product_id", &params.product_id)?;
        Ok(Self {
            id,
            creator_id: params.creator_id,
            name: params.name.trim().to_string(),
            product_id: params.product_id,
            front_image_url: params.front_image_url,
            back_image_url: params.back_image_url,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, patch: CustomDesignPatch) -> Result<(), DesignError> {
        if let Some(name) = patch.name {
            required("name", &name)?;
            self.name = name.trim().to_string();
        }
        if patch.front_image_url.is_some() {
            self.front_image_url = patch.front_image_url;
        }
        if patch.back_image_url.is_some() {
            self.back_image_url = patch.back_image_url;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), DesignError> {
        Ok(())
    }
}

/// Back-office review of a marketplace submission.
#[derive(Debug, Clone)]
pub enum SubmissionAction {
    Review { approve: bool },
}

impl Entity for DesignSubmission {
    type Id = String;
    type CreatePayload = SubmissionCreate;
    type Patch = ();
    type Action = SubmissionAction;
    type ActionResult = DesignSubmission;
    type Error = DesignError;

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, params: SubmissionCreate) -> Result<Self, DesignError> {
        required("title", &params.title)?;
        required("image_url", &params.image_url)?;
        Ok(Self {
            id,
            creator_id: params.creator_id,
            title: params.title.trim().to_string(),
            description: params.description,
            image_url: params.image_url,
            status: SubmissionStatus::Pending,
            created_at: Utc::now(),
            reviewed_at: None,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), DesignError> {
        Ok(())
    }

    fn handle_action(&mut self, action: SubmissionAction) -> Result<DesignSubmission, DesignError> {
        match action {
            SubmissionAction::Review { approve } => {
                if self.status != SubmissionStatus::Pending {
                    return Err(DesignError::AlreadyReviewed(self.status));
                }
                self.status = if approve {
                    SubmissionStatus::Approved
                } else {
                    SubmissionStatus::Rejected
                };
                self.reviewed_at = Some(Utc::now());
                Ok(self.clone())
            }
        }
    }
}
