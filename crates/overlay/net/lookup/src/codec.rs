//! Length-delimited protobuf framing for lookup batches.

use std::marker::PhantomData;

use asynchronous_codec::{Decoder, Encoder};
use bytes::BytesMut;

use crate::{
    LookupCodecError, LookupConfig, LookupRequests, LookupResponses, metrics::LookupMetrics,
    proto::lookup as pb,
};

/// Number of entries in a batch message, checked against
/// [`LookupConfig::batch_limit`].
pub trait BatchLen {
    /// Metrics label for this kind of batch.
    const KIND: &'static str;

    fn batch_len(&self) -> usize;
}

impl BatchLen for LookupRequests {
    const KIND: &'static str = "requests";

    fn batch_len(&self) -> usize {
        self.len()
    }
}

impl BatchLen for LookupResponses {
    const KIND: &'static str = "responses";

    fn batch_len(&self) -> usize {
        self.len()
    }
}

impl BatchLen for pb::LookupRequests {
    const KIND: &'static str = "requests";

    fn batch_len(&self) -> usize {
        self.requests.len()
    }
}

impl BatchLen for pb::LookupResponses {
    const KIND: &'static str = "responses";

    fn batch_len(&self) -> usize {
        self.responses.len()
    }
}

/// Frames `Msg` as its protobuf form `Proto`.
pub struct ProtoCodec<Proto, Msg> {
    inner: quick_protobuf_codec::Codec<Proto>,
    max_batch_size: usize,
    metrics: LookupMetrics,
    _marker: PhantomData<Msg>,
}

impl<Proto, Msg: BatchLen> ProtoCodec<Proto, Msg> {
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            inner: quick_protobuf_codec::Codec::new(config.max_message_size),
            max_batch_size: config.batch_limit(),
            metrics: LookupMetrics::new(Msg::KIND),
            _marker: PhantomData,
        }
    }
}

impl<Proto, Msg> ProtoCodec<Proto, Msg> {
    fn check_batch_len(&self, len: usize) -> Result<(), LookupCodecError> {
        if len > self.max_batch_size {
            self.metrics.inc_rejected();
            return Err(LookupCodecError::BatchTooLarge {
                len,
                max: self.max_batch_size,
            });
        }
        Ok(())
    }
}

impl<Proto, Msg> Encoder for ProtoCodec<Proto, Msg>
where
    Proto: quick_protobuf::MessageWrite,
    Msg: BatchLen + Into<Proto>,
{
    type Item<'a> = Msg;
    type Error = LookupCodecError;

    fn encode(&mut self, item: Self::Item<'_>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let len = item.batch_len();
        self.check_batch_len(len)?;
        self.inner.encode(item.into(), dst)?;
        self.metrics.inc_encoded(len);
        Ok(())
    }
}

impl<Proto, Msg> Decoder for ProtoCodec<Proto, Msg>
where
    Proto: BatchLen + for<'a> quick_protobuf::MessageRead<'a>,
    Msg: TryFrom<Proto>,
    <Msg as TryFrom<Proto>>::Error: Into<LookupCodecError>,
{
    type Item = Msg;
    type Error = LookupCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(proto) = self.inner.decode(src)? else {
            return Ok(None);
        };
        let len = proto.batch_len();
        self.check_batch_len(len)?;
        let msg = Msg::try_from(proto).map_err(Into::into)?;
        self.metrics.inc_decoded(len);
        Ok(Some(msg))
    }
}

/// Codec for [`LookupRequests`].
pub type LookupRequestCodec = ProtoCodec<pb::LookupRequests, LookupRequests>;

/// Codec for [`LookupResponses`].
pub type LookupResponseCodec = ProtoCodec<pb::LookupResponses, LookupResponses>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LookupResponse, Node, to_request_batch, to_request_batches};
    use assert_matches::assert_matches;
    use overlay_primitives::NodeId;

    #[test]
    fn request_batch_frames_roundtrip() {
        let config = LookupConfig::default();
        let batch = to_request_batch(&[NodeId::new([1u8; 32]), NodeId::new([2u8; 32])]);

        let mut buf = BytesMut::new();
        LookupRequestCodec::new(&config)
            .encode(batch.clone(), &mut buf)
            .unwrap();

        let decoded = LookupRequestCodec::new(&config).decode(&mut buf).unwrap();
        assert_eq!(decoded, Some(batch));
        assert!(buf.is_empty());
    }

    #[test]
    fn partial_frame_waits_for_more() {
        let config = LookupConfig::default();
        let batch = LookupResponses {
            responses: vec![LookupResponse::found(Node::with_id(NodeId::new([3u8; 32])))],
        };

        let mut full = BytesMut::new();
        LookupResponseCodec::new(&config)
            .encode(batch.clone(), &mut full)
            .unwrap();
        let mut partial = full.split_to(full.len() / 2);

        let mut codec = LookupResponseCodec::new(&config);
        assert_matches!(codec.decode(&mut partial), Ok(None));
        partial.unsplit(full);
        assert_eq!(codec.decode(&mut partial).unwrap(), Some(batch));
    }

    #[test]
    fn oversize_batch_is_rejected_on_encode() {
        let config = LookupConfig::default().with_max_batch_size(1);
        let batch = to_request_batch(&[NodeId::ZERO, NodeId::ZERO]);

        let mut buf = BytesMut::new();
        assert_matches!(
            LookupRequestCodec::new(&config).encode(batch, &mut buf),
            Err(LookupCodecError::BatchTooLarge { len: 2, max: 1 })
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn oversize_batch_is_rejected_on_decode() {
        let batch = to_request_batch(&[NodeId::ZERO; 3]);
        let mut buf = BytesMut::new();
        LookupRequestCodec::new(&LookupConfig::default())
            .encode(batch, &mut buf)
            .unwrap();

        let strict = LookupConfig::default().with_max_batch_size(2);
        assert_matches!(
            LookupRequestCodec::new(&strict).decode(&mut buf),
            Err(LookupCodecError::BatchTooLarge { len: 3, max: 2 })
        );
    }

    #[test]
    fn malformed_identity_is_rejected_on_decode() {
        let proto = pb::LookupRequests {
            requests: vec![pb::LookupRequest {
                identity: vec![0u8; 5],
            }],
        };
        let mut buf = BytesMut::new();
        quick_protobuf_codec::Codec::<pb::LookupRequests>::new(1024)
            .encode(proto, &mut buf)
            .unwrap();

        assert_matches!(
            LookupRequestCodec::new(&LookupConfig::default()).decode(&mut buf),
            Err(LookupCodecError::InvalidRequest { index: 0, .. })
        );
    }

    #[test]
    fn batch_size_is_checked_before_identities() {
        let mut requests = vec![pb::LookupRequest { identity: vec![1u8; 32] }; 2];
        requests.push(pb::LookupRequest {
            identity: vec![0u8; 5],
        });
        let mut buf = BytesMut::new();
        quick_protobuf_codec::Codec::<pb::LookupRequests>::new(1024)
            .encode(pb::LookupRequests { requests }, &mut buf)
            .unwrap();

        let strict = LookupConfig::default().with_max_batch_size(2);
        assert_matches!(
            LookupRequestCodec::new(&strict).decode(&mut buf),
            Err(LookupCodecError::BatchTooLarge { len: 3, max: 2 })
        );
    }

    #[test]
    fn zero_batch_limit_frames_single_requests() {
        let config = LookupConfig::default().with_max_batch_size(0);
        let ids = [NodeId::new([1u8; 32]), NodeId::new([2u8; 32])];
        let mut codec = LookupRequestCodec::new(&config);

        let mut buf = BytesMut::new();
        for batch in to_request_batches(&ids, config.max_batch_size) {
            codec.encode(batch, &mut buf).unwrap();
        }

        let mut decoded = Vec::new();
        while let Some(batch) = codec.decode(&mut buf).unwrap() {
            assert_eq!(batch.len(), 1);
            decoded.extend(batch.node_ids());
        }
        assert_eq!(decoded, ids);
    }

    #[test]
    fn oversize_frame_is_a_protocol_error() {
        let batch = to_request_batch(&[NodeId::ZERO]);
        let mut buf = BytesMut::new();
        LookupRequestCodec::new(&LookupConfig::default())
            .encode(batch, &mut buf)
            .unwrap();

        let config = LookupConfig::default().with_max_message_size(16);
        assert_matches!(
            LookupRequestCodec::new(&config).decode(&mut buf),
            Err(LookupCodecError::Protocol(_))
        );
    }
}
