use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use super::{CampaignError, CampaignTransition, PreOrderFilter};
use crate::domain::{Campaign, CampaignCreate, CampaignPatch, CampaignStatus, PreOrderEntry, PreOrderRequest};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

type Reply<T> = ServiceResponse<T, CampaignError>;

/// Typed messages for the campaign actor. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum CampaignRequest {
    CreateCampaign {
        params: CampaignCreate,
        now: DateTime<Utc>,
        respond_to: Reply<Campaign>,
    },
    GetCampaign {
        id: String,
        respond_to: Reply<Option<Campaign>>,
    },
    ListCampaigns {
        status: Option<CampaignStatus>,
        respond_to: Reply<Vec<Campaign>>,
    },
    UpdateCampaign {
        id: String,
        patch: CampaignPatch,
        respond_to: Reply<Campaign>,
    },
    DeleteCampaign {
        id: String,
        respond_to: Reply<()>,
    },
    Activate {
        id: String,
        respond_to: Reply<Campaign>,
    },
    PlacePreOrder {
        request: PreOrderRequest,
        now: DateTime<Utc>,
        respond_to: Reply<(PreOrderEntry, Campaign)>,
    },
    GetPreOrder {
        id: String,
        respond_to: Reply<Option<PreOrderEntry>>,
    },
    ListPreOrders {
        filter: PreOrderFilter,
        respond_to: Reply<Vec<PreOrderEntry>>,
    },
    CancelPreOrder {
        id: String,
        user_id: String,
        now: DateTime<Utc>,
        respond_to: Reply<PreOrderEntry>,
    },
    RecordPayment {
        id: String,
        user_id: String,
        payment_id: String,
        now: DateTime<Utc>,
        respond_to: Reply<PreOrderEntry>,
    },
    Close {
        id: String,
        now: DateTime<Utc>,
        respond_to: Reply<CampaignTransition>,
    },
    Cancel {
        id: String,
        now: DateTime<Utc>,
        respond_to: Reply<CampaignTransition>,
    },
    StartProduction {
        id: String,
        now: DateTime<Utc>,
        respond_to: Reply<CampaignTransition>,
    },
    ShipPreOrder {
        id: String,
        tracking_number: String,
        now: DateTime<Utc>,
        respond_to: Reply<PreOrderEntry>,
    },
    DeliverPreOrder {
        id: String,
        now: DateTime<Utc>,
        respond_to: Reply<PreOrderEntry>,
    },
    Fulfill {
        id: String,
        respond_to: Reply<Campaign>,
    },
    Shutdown,
}
