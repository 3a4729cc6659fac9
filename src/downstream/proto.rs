//! Wire messages and client stub for `data.DataService`.
//!
//! ```text
//! service DataService {
//!   rpc GetData(DataRequest) returns (DataResponse);
//! }
//! ```

use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::codegen::GrpcMethod;

pub const SERVICE_NAME: &str = "data.DataService";
pub const GET_DATA_PATH: &str = "/data.DataService/GetData";

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DataRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(message, optional, tag = "2")]
    pub field_mask: Option<::prost_types::FieldMask>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DataResponse {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub description: String,
}

/// Unary client for `DataService` over a shared channel.
#[derive(Debug, Clone)]
pub struct DataServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl DataServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn get_data(
        &mut self,
        request: impl tonic::IntoRequest<DataRequest>,
    ) -> Result<tonic::Response<DataResponse>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {e}")))?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(GET_DATA_PATH);
        let mut req = request.into_request();
        req.extensions_mut()
            .insert(GrpcMethod::new(SERVICE_NAME, "GetData"));
        self.inner.unary(req, path, codec).await
    }
}
