use mapping::MappingError;

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid source mappings: {0}")]
    Mappings(serde_json::Error),
    #[error("invalid options: {0}")]
    Options(serde_json::Error),
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
