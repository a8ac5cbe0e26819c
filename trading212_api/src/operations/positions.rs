use crate::{endpoints, response::Response, types::Position, Client, Error};

impl Client {
    /// Lists the open positions.
    pub async fn get_positions(&self) -> Result<Response<Position>, Error> {
        self.fetch(endpoints::POSITIONS, None).await
    }
}
