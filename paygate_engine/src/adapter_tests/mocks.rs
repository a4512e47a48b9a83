use mockall::mock;

use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

mock! {
    pub HttpTransport {}
    impl Transport for HttpTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
    }
}
