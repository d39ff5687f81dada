/// Successful admin API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// HTTP status code returned by the server
    pub status: u16,
    /// Decoded response body
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(status: u16, data: T) -> Self {
        Self { status, data }
    }

    /// Create a 200 OK response.
    pub fn ok(data: T) -> Self {
        Self::new(200, data)
    }

    /// Create a 201 Created response.
    pub fn created(data: T) -> Self {
        Self::new(201, data)
    }

    /// Create a 204 No Content response.
    pub fn no_content() -> Self
    where
        T: Default,
    {
        Self::new(204, T::default())
    }

    pub fn into_data(self) -> T {
        self.data
    }
}
