use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::{CampaignBook, CampaignError, CampaignRequest, ServiceResponse};

/// Actor owning every campaign and pre-order entry.
pub struct CampaignService {
    receiver: mpsc::Receiver<CampaignRequest>,
    book: CampaignBook,
}

impl CampaignService {
    pub fn new(buffer_size: usize) -> (Self, mpsc::Sender<CampaignRequest>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            book: CampaignBook::new(),
        };
        (service, sender)
    }

    #[instrument(name = "campaign_service", skip(self))]
    pub async fn run(mut self) {
        info!("CampaignService starting");
        while let Some(msg) = self.receiver.recv().await {
            if !self.handle(msg) {
                info!("CampaignService shutting down");
                break;
            }
        }
        info!("CampaignService stopped");
    }

    /// Handles one message; returns false on shutdown.
    fn handle(&mut self, msg: CampaignRequest) -> bool {
        let book = &mut self.book;
        match msg {
            CampaignRequest::CreateCampaign { params, now, respond_to } => {
                reply(respond_to, book.create_campaign(params, now));
            }
            CampaignRequest::GetCampaign { id, respond_to } => {
                reply(respond_to, Ok(book.campaign(&id).cloned()));
            }
            CampaignRequest::ListCampaigns { status, respond_to } => {
                reply(respond_to, Ok(book.list_campaigns(status)));
            }
            CampaignRequest::UpdateCampaign { id, patch, respond_to } => {
                reply(respond_to, book.update_campaign(&id, patch));
            }
            CampaignRequest::DeleteCampaign { id, respond_to } => {
                reply(respond_to, book.delete_campaign(&id));
            }
            CampaignRequest::Activate { id, respond_to } => {
                reply(respond_to, book.activate(&id));
            }
            CampaignRequest::PlacePreOrder { request, now, respond_to } => {
                reply(respond_to, book.place_pre_order(request, now));
            }
            CampaignRequest::GetPreOrder { id, respond_to } => {
                reply(respond_to, Ok(book.entry(&id).cloned()));
            }
            CampaignRequest::ListPreOrders { filter, respond_to } => {
                reply(respond_to, Ok(book.list_entries(&filter)));
            }
            CampaignRequest::CancelPreOrder { id, user_id, now, respond_to } => {
                reply(respond_to, book.cancel_pre_order(&id, &user_id, now));
            }
            CampaignRequest::RecordPayment { id, user_id, payment_id, now, respond_to } => {
                reply(respond_to, book.record_payment(&id, &user_id, payment_id, now));
            }
            CampaignRequest::Close { id, now, respond_to } => {
                reply(respond_to, book.close_campaign(&id, now));
            }
            CampaignRequest::Cancel { id, now, respond_to } => {
                reply(respond_to, book.cancel_campaign(&id, now));
            }
            CampaignRequest::StartProduction { id, now, respond_to } => {
                reply(respond_to, book.start_production(&id, now));
            }
            CampaignRequest::ShipPreOrder { id, tracking_number, now, respond_to } => {
                reply(respond_to, book.ship_pre_order(&id, tracking_number, now));
            }
            CampaignRequest::DeliverPreOrder { id, now, respond_to } => {
                reply(respond_to, book.deliver_pre_order(&id, now));
            }
            CampaignRequest::Fulfill { id, respond_to } => {
                reply(respond_to, book.fulfill_campaign(&id));
            }
            CampaignRequest::Shutdown => return false,
        }
        true
    }
}

fn reply<T>(respond_to: ServiceResponse<T, CampaignError>, result: Result<T, CampaignError>) {
    match &result {
        Ok(_) => debug!("Request handled"),
        Err(e) => warn!(error = %e, "Request rejected"),
    }
    let _ = respond_to.send(result);
}
