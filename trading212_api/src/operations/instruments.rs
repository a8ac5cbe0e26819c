use crate::{
    endpoints,
    response::Response,
    types::{ExchangeMetadata, Instrument},
    Client, Error,
};

impl Client {
    /// Lists exchanges with their working schedules.
    pub async fn get_exchanges_metadata(&self) -> Result<Response<ExchangeMetadata>, Error> {
        self.fetch(endpoints::EXCHANGES_METADATA, None).await
    }

    /// Lists every instrument tradable from the account.
    pub async fn get_all_instruments(&self) -> Result<Response<Instrument>, Error> {
        self.fetch(endpoints::INSTRUMENTS, None).await
    }
}
