use reqwest::Method;

use crate::{
    endpoints,
    response::Response,
    types::{PieDetails, PieMetaRequest, PieRequest, PieSummary},
    Client, Error,
};

impl Client {
    pub async fn get_pies(&self) -> Result<Response<PieSummary>, Error> {
        self.fetch(endpoints::PIES, None).await
    }

    pub async fn create_pie(&self, pie: &PieRequest) -> Result<PieDetails, Error> {
        self.submit(Method::POST, endpoints::PIES, pie).await
    }

    pub async fn get_pie(&self, pie_id: u64) -> Result<PieDetails, Error> {
        self.fetch_one(&endpoints::pie(pie_id)).await
    }

    /// Replaces the settings and instrument weights of a pie.
    pub async fn update_pie(&self, pie_id: u64, pie: &PieRequest) -> Result<PieDetails, Error> {
        self.submit(Method::POST, &endpoints::pie(pie_id), pie).await
    }

    /// Deletes a pie. Its holdings are moved back to the account.
    pub async fn delete_pie(&self, pie_id: u64) -> Result<(), Error> {
        self.execute(Method::DELETE, &endpoints::pie(pie_id)).await
    }

    /// Copies a pie under a new name and icon.
    pub async fn duplicate_pie(
        &self,
        pie_id: u64,
        meta: &PieMetaRequest,
    ) -> Result<PieDetails, Error> {
        self.submit(Method::POST, &endpoints::duplicate_pie(pie_id), meta)
            .await
    }
}
