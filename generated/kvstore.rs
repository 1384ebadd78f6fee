#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetReq {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetReply {
    #[prost(bool, tag = "1")]
    pub found: bool,
    #[prost(bytes = "vec", tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutReq {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
    #[prost(bool, tag = "3")]
    pub sync: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutReply {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub error: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeleteReq {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(bool, tag = "2")]
    pub sync: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeleteReply {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub error: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoBatchWriteReq {
    #[prost(message, repeated, tag = "1")]
    pub operations: ::prost::alloc::vec::Vec<ProtoBatchOp>,
    #[prost(bool, tag = "2")]
    pub sync: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoBatchOp {
    #[prost(oneof = "proto_batch_op::Op", tags = "1, 2")]
    pub op: ::core::option::Option<proto_batch_op::Op>,
}
/// Nested message and enum types in `ProtoBatchOp`.
pub mod proto_batch_op {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Op {
        #[prost(message, tag = "1")]
        Put(super::ProtoBatchPut),
        #[prost(message, tag = "2")]
        Delete(super::ProtoBatchDelete),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoBatchPut {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoBatchDelete {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoBatchWriteReply {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(uint64, tag = "2")]
    pub applied: u64,
    #[prost(string, tag = "3")]
    pub error: ::prost::alloc::string::String,
}
/// Empty bytes fields mean "not set". A limit of 0 means unlimited.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoScanReq {
    #[prost(bytes = "vec", tag = "1")]
    pub prefix: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub suffix: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub start: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub end: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint32, tag = "5")]
    pub limit: u32,
    #[prost(bool, tag = "6")]
    pub reverse: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoKeyValue {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoScanReply {
    #[prost(message, repeated, tag = "1")]
    pub entries: ::prost::alloc::vec::Vec<ProtoKeyValue>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoBeginTxnReq {
    #[prost(bool, tag = "1")]
    pub read_only: bool,
    #[prost(uint64, tag = "2")]
    pub timeout_ms: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoBeginTxnReply {
    #[prost(string, tag = "1")]
    pub transaction_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTxnReq {
    #[prost(string, tag = "1")]
    pub transaction_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTxnReply {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub error: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTxnGetReq {
    #[prost(string, tag = "1")]
    pub transaction_id: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub key: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTxnPutReq {
    #[prost(string, tag = "1")]
    pub transaction_id: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub value: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTxnDeleteReq {
    #[prost(string, tag = "1")]
    pub transaction_id: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub key: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTxnScanReq {
    #[prost(string, tag = "1")]
    pub transaction_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub scan: ::core::option::Option<ProtoScanReq>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStatsReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLatencySummary {
    #[prost(uint64, tag = "1")]
    pub count: u64,
    #[prost(double, tag = "2")]
    pub avg_micros: f64,
    #[prost(uint64, tag = "3")]
    pub min_micros: u64,
    #[prost(uint64, tag = "4")]
    pub max_micros: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoRecoveryStats {
    #[prost(uint64, tag = "1")]
    pub recovered_entries: u64,
    #[prost(uint64, tag = "2")]
    pub replayed_batches: u64,
    #[prost(uint64, tag = "3")]
    pub corrupted_entries: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStatsReply {
    #[prost(uint64, tag = "1")]
    pub key_count: u64,
    #[prost(uint64, tag = "2")]
    pub total_reads: u64,
    #[prost(uint64, tag = "3")]
    pub total_writes: u64,
    #[prost(uint64, tag = "4")]
    pub total_deletes: u64,
    #[prost(message, optional, tag = "5")]
    pub read_latency: ::core::option::Option<ProtoLatencySummary>,
    #[prost(message, optional, tag = "6")]
    pub write_latency: ::core::option::Option<ProtoLatencySummary>,
    #[prost(message, optional, tag = "7")]
    pub recovery: ::core::option::Option<ProtoRecoveryStats>,
    #[prost(int64, tag = "8")]
    pub started_at_unix_ms: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCompactReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCompactReply {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub error: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNodeInfoReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNodeAddress {
    #[prost(string, tag = "1")]
    pub host: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub port: u32,
    #[prost(bool, tag = "3")]
    pub available: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNodeInfoReply {
    #[prost(string, tag = "1")]
    pub node_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub role: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub primary: ::core::option::Option<ProtoNodeAddress>,
    #[prost(message, repeated, tag = "4")]
    pub replicas: ::prost::alloc::vec::Vec<ProtoNodeAddress>,
}
#[doc = r" Generated client implementations."]
pub mod grpc_kv_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcKvClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcKvClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcKvClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        #[doc = " Point operations"]
        pub async fn get(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetReq>,
        ) -> Result<tonic::Response<super::ProtoGetReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/Get");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn put(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoPutReq>,
        ) -> Result<tonic::Response<super::ProtoPutReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/Put");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn delete(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoDeleteReq>,
        ) -> Result<tonic::Response<super::ProtoDeleteReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/Delete");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn batch_write(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoBatchWriteReq>,
        ) -> Result<tonic::Response<super::ProtoBatchWriteReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/BatchWrite");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn scan(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoScanReq>,
        ) -> Result<tonic::Response<tonic::codec::Streaming<super::ProtoScanReply>>, tonic::Status>
        {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/Scan");
            self.inner
                .server_streaming(request.into_request(), path, codec)
                .await
        }
        #[doc = " Transactions"]
        pub async fn begin_transaction(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoBeginTxnReq>,
        ) -> Result<tonic::Response<super::ProtoBeginTxnReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/BeginTransaction");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn commit_transaction(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoTxnReq>,
        ) -> Result<tonic::Response<super::ProtoTxnReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/CommitTransaction");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn rollback_transaction(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoTxnReq>,
        ) -> Result<tonic::Response<super::ProtoTxnReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/RollbackTransaction");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn transaction_get(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoTxnGetReq>,
        ) -> Result<tonic::Response<super::ProtoGetReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/TransactionGet");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn transaction_put(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoTxnPutReq>,
        ) -> Result<tonic::Response<super::ProtoPutReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/TransactionPut");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn transaction_delete(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoTxnDeleteReq>,
        ) -> Result<tonic::Response<super::ProtoDeleteReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/TransactionDelete");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn transaction_scan(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoTxnScanReq>,
        ) -> Result<tonic::Response<tonic::codec::Streaming<super::ProtoScanReply>>, tonic::Status>
        {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/TransactionScan");
            self.inner
                .server_streaming(request.into_request(), path, codec)
                .await
        }
        #[doc = " Admin"]
        pub async fn get_stats(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoStatsReq>,
        ) -> Result<tonic::Response<super::ProtoStatsReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/GetStats");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn compact(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoCompactReq>,
        ) -> Result<tonic::Response<super::ProtoCompactReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/Compact");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_node_info(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoNodeInfoReq>,
        ) -> Result<tonic::Response<super::ProtoNodeInfoReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvstore.GrpcKv/GetNodeInfo");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcKvClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcKvClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcKvClient {{ ... }}")
        }
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_kv_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcKvServer."]
    #[async_trait]
    pub trait GrpcKv: Send + Sync + 'static {
        #[doc = " Point operations"]
        async fn get(
            &self,
            request: tonic::Request<super::ProtoGetReq>,
        ) -> Result<tonic::Response<super::ProtoGetReply>, tonic::Status>;
        async fn put(
            &self,
            request: tonic::Request<super::ProtoPutReq>,
        ) -> Result<tonic::Response<super::ProtoPutReply>, tonic::Status>;
        async fn delete(
            &self,
            request: tonic::Request<super::ProtoDeleteReq>,
        ) -> Result<tonic::Response<super::ProtoDeleteReply>, tonic::Status>;
        async fn batch_write(
            &self,
            request: tonic::Request<super::ProtoBatchWriteReq>,
        ) -> Result<tonic::Response<super::ProtoBatchWriteReply>, tonic::Status>;
        #[doc = "Server streaming response type for the Scan method."]
        type ScanStream: futures_core::Stream<Item = Result<super::ProtoScanReply, tonic::Status>>
            + Send
            + Sync
            + 'static;
        async fn scan(
            &self,
            request: tonic::Request<super::ProtoScanReq>,
        ) -> Result<tonic::Response<Self::ScanStream>, tonic::Status>;
        #[doc = " Transactions"]
        async fn begin_transaction(
            &self,
            request: tonic::Request<super::ProtoBeginTxnReq>,
        ) -> Result<tonic::Response<super::ProtoBeginTxnReply>, tonic::Status>;
        async fn commit_transaction(
            &self,
            request: tonic::Request<super::ProtoTxnReq>,
        ) -> Result<tonic::Response<super::ProtoTxnReply>, tonic::Status>;
        async fn rollback_transaction(
            &self,
            request: tonic::Request<super::ProtoTxnReq>,
        ) -> Result<tonic::Response<super::ProtoTxnReply>, tonic::Status>;
        async fn transaction_get(
            &self,
            request: tonic::Request<super::ProtoTxnGetReq>,
        ) -> Result<tonic::Response<super::ProtoGetReply>, tonic::Status>;
        async fn transaction_put(
            &self,
            request: tonic::Request<super::ProtoTxnPutReq>,
        ) -> Result<tonic::Response<super::ProtoPutReply>, tonic::Status>;
        async fn transaction_delete(
            &self,
            request: tonic::Request<super::ProtoTxnDeleteReq>,
        ) -> Result<tonic::Response<super::ProtoDeleteReply>, tonic::Status>;
        #[doc = "Server streaming response type for the TransactionScan method."]
        type TransactionScanStream: futures_core::Stream<Item = Result<super::ProtoScanReply, tonic::Status>>
            + Send
            + Sync
            + 'static;
        async fn transaction_scan(
            &self,
            request: tonic::Request<super::ProtoTxnScanReq>,
        ) -> Result<tonic::Response<Self::TransactionScanStream>, tonic::Status>;
        #[doc = " Admin"]
        async fn get_stats(
            &self,
            request: tonic::Request<super::ProtoStatsReq>,
        ) -> Result<tonic::Response<super::ProtoStatsReply>, tonic::Status>;
        async fn compact(
            &self,
            request: tonic::Request<super::ProtoCompactReq>,
        ) -> Result<tonic::Response<super::ProtoCompactReply>, tonic::Status>;
        async fn get_node_info(
            &self,
            request: tonic::Request<super::ProtoNodeInfoReq>,
        ) -> Result<tonic::Response<super::ProtoNodeInfoReply>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcKvServer<T: GrpcKv> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcKv> GrpcKvServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcKvServer<T>
    where
        T: GrpcKv,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/kvstore.GrpcKv/Get" => {
                    #[allow(non_camel_case_types)]
                    struct GetSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoGetReq> for GetSvc<T> {
                        type Response = super::ProtoGetReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/Put" => {
                    #[allow(non_camel_case_types)]
                    struct PutSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoPutReq> for PutSvc<T> {
                        type Response = super::ProtoPutReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPutReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).put(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = PutSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/Delete" => {
                    #[allow(non_camel_case_types)]
                    struct DeleteSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoDeleteReq> for DeleteSvc<T> {
                        type Response = super::ProtoDeleteReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoDeleteReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).delete(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = DeleteSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/BatchWrite" => {
                    #[allow(non_camel_case_types)]
                    struct BatchWriteSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoBatchWriteReq> for BatchWriteSvc<T> {
                        type Response = super::ProtoBatchWriteReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoBatchWriteReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).batch_write(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = BatchWriteSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/Scan" => {
                    #[allow(non_camel_case_types)]
                    struct ScanSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::ServerStreamingService<super::ProtoScanReq> for ScanSvc<T> {
                        type Response = super::ProtoScanReply;
                        type ResponseStream = T::ScanStream;
                        type Future =
                            BoxFuture<tonic::Response<Self::ResponseStream>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoScanReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).scan(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1;
                        let inner = inner.0;
                        let method = ScanSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.server_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/BeginTransaction" => {
                    #[allow(non_camel_case_types)]
                    struct BeginTransactionSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoBeginTxnReq> for BeginTransactionSvc<T> {
                        type Response = super::ProtoBeginTxnReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoBeginTxnReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).begin_transaction(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = BeginTransactionSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/CommitTransaction" => {
                    #[allow(non_camel_case_types)]
                    struct CommitTransactionSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoTxnReq> for CommitTransactionSvc<T> {
                        type Response = super::ProtoTxnReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTxnReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).commit_transaction(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = CommitTransactionSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/RollbackTransaction" => {
                    #[allow(non_camel_case_types)]
                    struct RollbackTransactionSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoTxnReq> for RollbackTransactionSvc<T> {
                        type Response = super::ProtoTxnReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTxnReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).rollback_transaction(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = RollbackTransactionSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/TransactionGet" => {
                    #[allow(non_camel_case_types)]
                    struct TransactionGetSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoTxnGetReq> for TransactionGetSvc<T> {
                        type Response = super::ProtoGetReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTxnGetReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).transaction_get(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = TransactionGetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/TransactionPut" => {
                    #[allow(non_camel_case_types)]
                    struct TransactionPutSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoTxnPutReq> for TransactionPutSvc<T> {
                        type Response = super::ProtoPutReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTxnPutReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).transaction_put(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = TransactionPutSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/TransactionDelete" => {
                    #[allow(non_camel_case_types)]
                    struct TransactionDeleteSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoTxnDeleteReq> for TransactionDeleteSvc<T> {
                        type Response = super::ProtoDeleteReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTxnDeleteReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).transaction_delete(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = TransactionDeleteSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/TransactionScan" => {
                    #[allow(non_camel_case_types)]
                    struct TransactionScanSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::ServerStreamingService<super::ProtoTxnScanReq>
                        for TransactionScanSvc<T>
                    {
                        type Response = super::ProtoScanReply;
                        type ResponseStream = T::TransactionScanStream;
                        type Future =
                            BoxFuture<tonic::Response<Self::ResponseStream>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTxnScanReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).transaction_scan(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1;
                        let inner = inner.0;
                        let method = TransactionScanSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.server_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/GetStats" => {
                    #[allow(non_camel_case_types)]
                    struct GetStatsSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoStatsReq> for GetStatsSvc<T> {
                        type Response = super::ProtoStatsReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoStatsReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_stats(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetStatsSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/Compact" => {
                    #[allow(non_camel_case_types)]
                    struct CompactSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoCompactReq> for CompactSvc<T> {
                        type Response = super::ProtoCompactReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoCompactReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).compact(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = CompactSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kvstore.GrpcKv/GetNodeInfo" => {
                    #[allow(non_camel_case_types)]
                    struct GetNodeInfoSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoNodeInfoReq> for GetNodeInfoSvc<T> {
                        type Response = super::ProtoNodeInfoReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoNodeInfoReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_node_info(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetNodeInfoSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcKv> Clone for GrpcKvServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcKv> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcKv> tonic::transport::NamedService for GrpcKvServer<T> {
        const NAME: &'static str = "kvstore.GrpcKv";
    }
}
