// @generated
// Generated from: proto/jalki/v1/trace.proto
// Manual check-in for offline builds.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Span {
    #[prost(string, tag = "1")]
    pub trace_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub span_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub parent_span_id: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub service: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub operation: ::prost::alloc::string::String,
    #[prost(int64, tag = "6")]
    pub start_unix_ns: i64,
    #[prost(int64, tag = "7")]
    pub duration_ns: i64,
    #[prost(map = "string, string", tag = "8")]
    pub tags:
        ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
    #[prost(string, tag = "9")]
    pub agent_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SpanChunk {
    #[prost(string, tag = "1")]
    pub trace_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub span_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub service: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub agent_id: ::prost::alloc::string::String,
    #[prost(uint32, tag = "5")]
    pub sequence: u32,
    #[prost(bool, tag = "6")]
    pub last: bool,
    #[prost(bytes = "vec", tag = "7")]
    pub fragment: ::prost::alloc::vec::Vec<u8>,
}

pub mod trace_ingest_client {
    #![allow(clippy::derive_partial_eq_without_eq)]
    use tonic::codegen::*;

    #[derive(Debug, Clone)]
    pub struct TraceIngestClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl TraceIngestClient<tonic::transport::Channel> {
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }

    impl<T> TraceIngestClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
        <T::ResponseBody as Body>::Data: Into<Bytes> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        pub async fn send_span(
            &mut self,
            request: impl tonic::IntoStreamingRequest<Message = super::Span>,
        ) -> Result<tonic::Response<()>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = tonic::codegen::http::uri::PathAndQuery::from_static(
                "/jalki.v1.TraceIngest/SendSpan",
            );
            self.inner
                .client_streaming(request.into_streaming_request(), path, codec)
                .await
        }

        pub async fn send_span_chunk(
            &mut self,
            request: impl tonic::IntoStreamingRequest<Message = super::SpanChunk>,
        ) -> Result<tonic::Response<()>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = tonic::codegen::http::uri::PathAndQuery::from_static(
                "/jalki.v1.TraceIngest/SendSpanChunk",
            );
            self.inner
                .client_streaming(request.into_streaming_request(), path, codec)
                .await
        }
    }
}

pub mod trace_ingest_server {
    #![allow(clippy::derive_partial_eq_without_eq)]
    use tonic::codegen::*;

    #[tonic::async_trait]
    pub trait TraceIngest: Send + Sync + 'static {
        async fn send_span(
            &self,
            request: tonic::Request<tonic::Streaming<super::Span>>,
        ) -> Result<tonic::Response<()>, tonic::Status>;
        async fn send_span_chunk(
            &self,
            request: tonic::Request<tonic::Streaming<super::SpanChunk>>,
        ) -> Result<tonic::Response<()>, tonic::Status>;
    }

    #[derive(Debug)]
    pub struct TraceIngestServer<T: TraceIngest> {
        inner: Arc<T>,
    }

    impl<T: TraceIngest> TraceIngestServer<T> {
        pub fn new(inner: T) -> Self {
            Self {
                inner: Arc::new(inner),
            }
        }

        pub fn from_arc(inner: Arc<T>) -> Self {
            Self { inner }
        }
    }

    impl<T: TraceIngest> Clone for TraceIngestServer<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }

    impl<T: TraceIngest> Service<http::Request<tonic::body::BoxBody>> for TraceIngestServer<T> {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: http::Request<tonic::body::BoxBody>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/jalki.v1.TraceIngest/SendSpan" => {
                    struct SendSpanSvc<T: TraceIngest>(pub Arc<T>);
                    impl<T: TraceIngest> tonic::server::ClientStreamingService<super::Span>
                        for SendSpanSvc<T>
                    {
                        type Response = ();
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<tonic::Streaming<super::Span>>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            Box::pin(async move { inner.send_span(request).await })
                        }
                    }
                    Box::pin(async move {
                        let method = SendSpanSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        let res = grpc.client_streaming(method, req).await;
                        Ok(res)
                    })
                }
                "/jalki.v1.TraceIngest/SendSpanChunk" => {
                    struct SendSpanChunkSvc<T: TraceIngest>(pub Arc<T>);
                    impl<T: TraceIngest> tonic::server::ClientStreamingService<super::SpanChunk>
                        for SendSpanChunkSvc<T>
                    {
                        type Response = ();
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<tonic::Streaming<super::SpanChunk>>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            Box::pin(async move { inner.send_span_chunk(request).await })
                        }
                    }
                    Box::pin(async move {
                        let method = SendSpanChunkSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        let res = grpc.client_streaming(method, req).await;
                        Ok(res)
                    })
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::empty_body())
                        .unwrap())
                }),
            }
        }
    }

    impl<T: TraceIngest> tonic::server::NamedService for TraceIngestServer<T> {
        const NAME: &'static str = "jalki.v1.TraceIngest";
    }
}
