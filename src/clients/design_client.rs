use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::clients::ProductClient;
use crate::design_actor::{CustomDesignPatch, DesignError, SubmissionAction};
use crate::domain::{
    CustomDesign, CustomDesignCreate, DesignSubmission, SubmissionCreate, SubmissionStatus,
};
use crate::product_actor::ProductError;

/// Client over both design sources.
#[derive(Clone)]
pub struct DesignClient {
    custom: ResourceClient<CustomDesign>,
    submissions: ResourceClient<DesignSubmission>,
    product_client: ProductClient,
}

impl DesignClient {
    pub fn new(
        custom: ResourceClient<CustomDesign>,
        submissions: ResourceClient<DesignSubmission>,
        product_client: ProductClient,
    ) -> Self {
        Self { custom, submissions, product_client }
    }

    #[instrument(skip(self))]
    pub async fn create_custom_design(&self, params: CustomDesignCreate) -> Result<CustomDesign, DesignError> {
        debug!("Sending request");
        match self.product_client.require_product(params.product_id.clone()).await {
            Ok(_) => {}
            Err(ProductError::NotFound(id)) => {
                return Err(DesignError::ValidationError(format!("unknown product: {id}")));
            }
            Err(e) => return Err(DesignError::ActorCommunicationError(e.to_string())),
        }
        self.custom.create(params).await.map_err(DesignError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_custom_design(
        &self,
        id: String,
        creator_id: String,
        patch: CustomDesignPatch,
    ) -> Result<CustomDesign, DesignError> {
        debug!("Sending request");
        let design = self.require_custom_design(id.clone()).await?;
        if design.creator_id != creator_id {
            return Err(DesignError::NotFound(id));
        }
        self.custom.update(id, patch).await.map_err(DesignError::from)
    }

    #[instrument(skip(self))]
    pub async fn require_custom_design(&self, id: String) -> Result<CustomDesign, DesignError> {
        debug!("Sending request");
        self.custom
            .get(id.clone())
            .await?
            .ok_or(DesignError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_custom_designs_by(&self, creator_id: String) -> Result<Vec<CustomDesign>, DesignError> {
        debug!("Sending request");
        let mut designs: Vec<_> = self
            .custom
            .list()
            .await?
            .into_iter()
            .filter(|d| d.creator_id == creator_id)
            .collect();
        designs.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(designs)
    }

    #[instrument(skip(self))]
    pub async fn submit_design(&self, params: SubmissionCreate) -> Result<DesignSubmission, DesignError> {
        debug!("Sending request");
        self.submissions.create(params).await.map_err(DesignError::from)
    }

    #[instrument(skip(self))]
    pub async fn list_submissions(
        &self,
        status: Option<SubmissionStatus>,
        creator_id: Option<String>,
    ) -> Result<Vec<DesignSubmission>, DesignError> {
        debug!("Sending request");
        let mut submissions: Vec<_> = self
            .submissions
            .list()
            .await?
            .into_iter()
            .filter(|s| status.map_or(true, |status| s.status == status))
            .filter(|s| creator_id.as_ref().map_or(true, |id| &s.creator_id == id))
            .collect();
        submissions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(submissions)
    }

    #[instrument(skip(self))]
    pub async fn review_submission(&self, id: String, approve: bool) -> Result<DesignSubmission, DesignError> {
        debug!("Sending request");
        self.submissions
            .perform_action(id, SubmissionAction::Review { approve })
            .await
            .map_err(DesignError::from)
    }

    /// Finds who owns a design id, checking designer-tool designs first and
    /// marketplace submissions second.
    #[instrument(skip(self))]
    pub async fn resolve_creator(&self, design_id: String) -> Result<Option<String>, DesignError> {
        debug!("Resolving design creator");
        if let Some(design) = self.custom.get(design_id.clone()).await? {
            return Ok(Some(design.creator_id));
        }
        Ok(self
            .submissions
            .get(design_id)
            .await?
            .map(|submission| submission.creator_id))
    }
}
