use super::constants::API_URL;
use super::operations::{InspectTarget, Operation};
use super::query::{Page, PageSource, Paginator, QueryResult, ReadByQuery};
use super::request::{ControlCredentials, LoginCredentials, RequestEnvelope};
use super::response::ApiResponse;
use super::session::SessionManager;
use super::transport::{HttpTransport, Transport};
use crate::auth::Credentials;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::RecordInstance;
use crate::schema::MetadataSource;
use crate::xml::XmlElement;
use async_trait::async_trait;
use log::{debug, info};

/// Intacct XML gateway client.
///
/// Owns one envelope and one session; every call borrows the client mutably,
/// so a client serves a single call sequence at a time.
pub struct IntacctClient<T: Transport = HttpTransport> {
    transport: T,
    envelope: RequestEnvelope,
    session: SessionManager,
    paginator: Paginator,
}

impl IntacctClient<HttpTransport> {
    pub fn from_config(config: &Config, credentials: &Credentials) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout(), config.connect_timeout())?;
        Ok(Self::new(transport, &credentials.control, &credentials.login)?
            .with_gateway_url(&config.gateway_url)
            .with_page_sizes(config.page_size, config.max_page_size))
    }
}

impl<T: Transport> IntacctClient<T> {
    pub fn new(
        transport: T,
        control: &ControlCredentials,
        login: &LoginCredentials,
    ) -> Result<Self> {
        Ok(Self {
            transport,
            envelope: RequestEnvelope::build(control, login)?,
            session: SessionManager::new(API_URL),
            paginator: Paginator::default(),
        })
    }

    /// Gateway used until a session endpoint replaces it
    pub fn with_gateway_url(mut self, url: &str) -> Self {
        if !self.session.is_active() {
            self.session = SessionManager::new(url);
        }
        self
    }

    pub fn with_page_sizes(mut self, default_page_size: u32, max_page_size: u32) -> Self {
        self.paginator = Paginator::new(default_page_size, max_page_size);
        self
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn envelope(&self) -> &RequestEnvelope {
        &self.envelope
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(&self, operation: &Operation) -> Result<ApiResponse> {
        let body = self.envelope.with_operation(operation.to_element()?)?;
        let url = self.session.base_url();
        debug!("Sending {} to {}", operation.name(), url);

        let response = self.transport.post(url, body).await?;
        ApiResponse::parse(response.status, response.body)
    }

    /// Swap password login for a session token and the session endpoint
    pub async fn get_api_session(&mut self) -> Result<()> {
        let response = self.send(&Operation::GetApiSession).await?;
        self.session
            .establish(&mut self.envelope, &response.root, &response.raw)
    }

    pub async fn create(&mut self, records: Vec<RecordInstance>) -> Result<ApiResponse> {
        info!("Creating {} record(s)", records.len());
        self.send(&Operation::Create(records)).await
    }

    pub async fn update(&mut self, records: Vec<RecordInstance>) -> Result<ApiResponse> {
        info!("Updating {} record(s)", records.len());
        self.send(&Operation::Update(records)).await
    }

    pub async fn delete(&mut self, object: &str, keys: &[String]) -> Result<ApiResponse> {
        info!("Deleting {} key(s) of {}", keys.len(), object);
        self.send(&Operation::Delete {
            object: object.to_string(),
            keys: keys.to_vec(),
        })
        .await
    }

    /// Delete keys across several objects, one `delete` call per object.
    ///
    /// Every target is validated before the first call is sent; the first
    /// failing call stops the rest.
    pub async fn delete_many(
        &mut self,
        targets: &[(String, Vec<String>)],
    ) -> Result<Vec<ApiResponse>> {
        if targets.is_empty() {
            return Err(Error::validation("delete requires at least one object"));
        }
        let operations: Vec<Operation> = targets
            .iter()
            .map(|(object, keys)| Operation::Delete {
                object: object.clone(),
                keys: keys.clone(),
            })
            .collect();
        for operation in &operations {
            operation.to_element()?;
        }

        let mut responses = Vec::with_capacity(operations.len());
        for operation in &operations {
            responses.push(self.send(operation).await?);
        }
        info!("Deleted records from {} object(s)", responses.len());
        Ok(responses)
    }

    /// Returns the `data` element of the inspect result
    pub async fn inspect(&mut self, target: InspectTarget, detail: bool) -> Result<XmlElement> {
        let response = self.send(&Operation::Inspect { target, detail }).await?;
        response.require_data().cloned()
    }

    /// Run a query and follow it with readMore until the server reports nothing left
    pub async fn read_by_query(&mut self, query: ReadByQuery) -> Result<QueryResult> {
        let paginator = self.paginator;
        paginator.query(self, &query).await
    }

    pub async fn read_more(&mut self, object: &str) -> Result<Page> {
        let response = self
            .send(&Operation::ReadMore {
                object: object.to_string(),
            })
            .await?;
        Page::from_response(&response)
    }
}

#[async_trait]
impl<T: Transport> PageSource for IntacctClient<T> {
    async fn first_page(&mut self, query: &ReadByQuery, page_size: u32) -> Result<Page> {
        let response = self
            .send(&Operation::ReadByQuery {
                query: query.clone(),
                page_size,
            })
            .await?;
        Page::from_response(&response)
    }

    async fn next_page(&mut self, object: &str) -> Result<Page> {
        self.read_more(object).await
    }
}

#[async_trait]
impl<T: Transport> MetadataSource for IntacctClient<T> {
    async fn inspect_type(&mut self, type_name: &str) -> Result<XmlElement> {
        if type_name.trim().is_empty() {
            return Err(Error::validation("type name must not be empty"));
        }
        self.inspect(InspectTarget::Name(type_name.to_string()), true)
            .await
    }
}
