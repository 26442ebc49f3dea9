use super::CatalogError;

pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Requested window over an ordered result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page_index: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page_index: i64, page_size: i64) -> Result<Self, CatalogError> {
        if page_size <= 0 {
            return Err(CatalogError::InvalidArgument(format!(
                "page size must be positive, got {page_size}"
            )));
        }
        if page_index < 0 {
            return Err(CatalogError::InvalidArgument(format!(
                "page index must not be negative, got {page_index}"
            )));
        }
        let page_index = u32::try_from(page_index).map_err(|_| {
            CatalogError::InvalidArgument(format!("page index {page_index} is out of range"))
        })?;
        let page_size = u32::try_from(page_size).map_err(|_| {
            CatalogError::InvalidArgument(format!("page size {page_size} is out of range"))
        })?;
        Ok(Self {
            page_index,
            page_size,
        })
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows to skip before the page starts. Cannot overflow: both factors fit in 32 bits.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_index) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE as u32,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub page_index: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(request: PageRequest, total_count: u64, data: Vec<T>) -> Self {
        Self {
            page_index: request.page_index(),
            page_size: request.page_size(),
            total_count,
            data,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page_index: self.page_index,
            page_size: self.page_size,
            total_count: self.total_count,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
