use crate::clients::{
    CampaignClient, DesignClient, OrderClient, ProductClient, UserClient, WithdrawalClient,
};

/// Clients shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub products: ProductClient,
    pub designs: DesignClient,
    pub orders: OrderClient,
    pub withdrawals: WithdrawalClient,
    pub campaigns: CampaignClient,
}
