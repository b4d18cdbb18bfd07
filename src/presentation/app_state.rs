// Application state for HTTP handlers
use crate::application::account_service::AccountService;
use crate::application::upload_service::UploadService;

#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub upload_service: UploadService,
}
