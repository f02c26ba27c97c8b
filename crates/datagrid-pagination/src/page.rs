//! Page-number pagination over a page source

use crate::adapter::PageSource;
use crate::error::{PaginationError, Result};
use datagrid_core::Row;
use serde::{Deserialize, Serialize};

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
	/// Items in this page
	pub object_list: Vec<T>,
	/// Current page number (1-indexed)
	pub number: usize,
	/// Total number of pages
	pub num_pages: usize,
	/// Total number of items across all pages
	pub count: usize,
	/// Items per page
	pub page_size: usize,
}

impl<T> Page<T> {
	/// Creates a page
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_pagination::Page;
	///
	/// let page = Page::new(vec!["a", "b", "c"], 1, 10, 30, 3);
	/// assert_eq!(page.num_pages, 10);
	/// assert_eq!(page.object_list.len(), 3);
	/// ```
	pub fn new(
		object_list: Vec<T>,
		number: usize,
		num_pages: usize,
		count: usize,
		page_size: usize,
	) -> Self {
		Self {
			object_list,
			number,
			num_pages,
			count,
			page_size,
		}
	}

	/// Returns the 1-based index of the first item on this page, 0 when empty
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_pagination::Page;
	///
	/// let page = Page::new(vec![11, 12], 2, 2, 12, 10);
	/// assert_eq!(page.start_index(), 11);
	/// assert_eq!(page.end_index(), 12);
	/// ```
	pub fn start_index(&self) -> usize {
		if self.object_list.is_empty() {
			0
		} else {
			(self.number - 1) * self.page_size + 1
		}
	}

	/// Returns the 1-based index of the last item on this page, 0 when empty
	pub fn end_index(&self) -> usize {
		if self.object_list.is_empty() {
			0
		} else {
			self.start_index() + self.object_list.len() - 1
		}
	}

	/// Returns true if there is a next page
	pub fn has_next(&self) -> bool {
		self.number < self.num_pages
	}

	/// Returns true if there is a previous page
	pub fn has_previous(&self) -> bool {
		self.number > 1
	}

	/// Returns the next page number
	///
	/// # Errors
	/// Returns `InvalidPage` on the last page
	pub fn next_page_number(&self) -> Result<usize> {
		if self.has_next() {
			Ok(self.number + 1)
		} else {
			Err(PaginationError::InvalidPage(
				"That page contains no results".to_string(),
			))
		}
	}

	/// Returns the previous page number
	///
	/// # Errors
	/// Returns `InvalidPage` on the first page
	pub fn previous_page_number(&self) -> Result<usize> {
		if self.has_previous() {
			Ok(self.number - 1)
		} else {
			Err(PaginationError::InvalidPage(
				"That page number is less than 1".to_string(),
			))
		}
	}

	/// Number of items on this page
	pub fn len(&self) -> usize {
		self.object_list.len()
	}

	/// Returns true if this page has no items
	pub fn is_empty(&self) -> bool {
		self.object_list.is_empty()
	}
}

const LAST_PAGE_WORDS: [&str; 1] = ["last"];

/// A requested page as it arrives from a client
///
/// Query strings carry text while JSON bodies (jqGrid among them) send
/// plain numbers, so both deserialize:
///
/// ```
/// use datagrid_pagination::page::PageParam;
///
/// let number: PageParam = serde_json::from_str("2").unwrap();
/// let word: PageParam = serde_json::from_str(r#""last""#).unwrap();
/// assert_eq!(number.resolve().unwrap(), 2);
/// assert_eq!(word.resolve().unwrap(), usize::MAX);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageParam {
	/// A 1-based page number
	Number(usize),
	/// Digits or `"last"`
	Word(String),
}

impl PageParam {
	/// Resolves to a 1-based page number, `usize::MAX` for the last page
	///
	/// Page numbers start at 1 whichever way they arrive.
	///
	/// # Errors
	/// Returns `InvalidPage` for 0 and for words that are not a page
	pub fn resolve(&self) -> Result<usize> {
		let number = match self {
			PageParam::Number(number) => Some(*number),
			PageParam::Word(word) => {
				let word = word.trim();
				if LAST_PAGE_WORDS.iter().any(|last| word.eq_ignore_ascii_case(last)) {
					return Ok(usize::MAX);
				}
				word.parse::<usize>().ok()
			}
		};
		match number {
			Some(number) if number >= 1 => Ok(number),
			_ => Err(PaginationError::InvalidPage(format!(
				"Invalid page number: {}",
				self
			))),
		}
	}
}

impl std::fmt::Display for PageParam {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PageParam::Number(number) => write!(f, "{}", number),
			PageParam::Word(word) => write!(f, "{}", word.trim()),
		}
	}
}

impl From<usize> for PageParam {
	fn from(number: usize) -> Self {
		PageParam::Number(number)
	}
}

impl From<&str> for PageParam {
	fn from(word: &str) -> Self {
		PageParam::Word(word.to_string())
	}
}

/// Splits a page source into numbered pages of a fixed size
#[derive(Debug, Clone)]
pub struct Paginator<S> {
	source: S,
	per_page: usize,
}

impl<S: PageSource> Paginator<S> {
	/// Words accepted by [`Paginator::page_from_param`] for the last page
	pub const LAST_PAGE_STRINGS: [&'static str; 1] = LAST_PAGE_WORDS;

	/// Creates a paginator
	///
	/// # Errors
	/// Returns `InvalidPage` when `per_page` is 0
	pub fn new(source: S, per_page: usize) -> Result<Self> {
		if per_page == 0 {
			return Err(PaginationError::InvalidPage(
				"Page size must be at least 1".to_string(),
			));
		}
		Ok(Self { source, per_page })
	}

	/// Items per page
	pub fn per_page(&self) -> usize {
		self.per_page
	}

	/// The wrapped source
	pub fn source(&self) -> &S {
		&self.source
	}

	/// Number of pages for a total item count
	pub fn num_pages_for(&self, count: usize) -> usize {
		count.div_ceil(self.per_page)
	}

	/// Fetches a page by 1-based number
	///
	/// Page 0 is treated as page 1 and a number past the last page yields
	/// the last page. An empty source yields page 1 of 0.
	pub async fn page(&self, number: usize) -> Result<Page<Row>> {
		let count = self.source.count().await?;
		let num_pages = self.num_pages_for(count);
		let number = number.clamp(1, num_pages.max(1));
		let offset = (number - 1) * self.per_page;
		let object_list = if count == 0 {
			Vec::new()
		} else {
			self.source.get_items(offset, self.per_page).await?
		};
		tracing::debug!(
			"Loaded page {}/{} ({} of {} rows)",
			number,
			num_pages,
			object_list.len(),
			count
		);
		Ok(Page::new(object_list, number, num_pages, count, self.per_page))
	}

	/// Fetches a page from a request parameter
	///
	/// A missing parameter is page 1, `"last"` is the last page.
	///
	/// # Errors
	/// Returns `InvalidPage` when the parameter is not a positive number
	pub async fn page_from_param(&self, param: Option<&str>) -> Result<Page<Row>> {
		let number = match param {
			Some(raw) => PageParam::from(raw).resolve()?,
			None => 1,
		};
		self.page(number).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::adapter::ArrayAdapter;
	use rstest::*;

	#[fixture]
	fn twenty_three() -> ArrayAdapter {
		ArrayAdapter::new((0..23).map(|i| Row::new().with("id", i as i64)).collect())
	}

	#[rstest]
	#[tokio::test]
	async fn test_middle_page(twenty_three: ArrayAdapter) {
		let paginator = Paginator::new(twenty_three, 5).unwrap();
		let page = paginator.page(3).await.unwrap();
		assert_eq!(page.len(), 5);
		assert_eq!(page.number, 3);
		assert_eq!(page.num_pages, 5);
		assert_eq!(page.count, 23);
		assert_eq!((page.start_index(), page.end_index()), (11, 15));
		assert!(page.has_next());
		assert!(page.has_previous());
	}

	#[rstest]
	#[case(5, 5, 3)]
	#[case(99, 5, 3)]
	#[case(0, 1, 5)]
	#[tokio::test]
	async fn test_page_number_is_clamped(
		twenty_three: ArrayAdapter,
		#[case] requested: usize,
		#[case] number: usize,
		#[case] len: usize,
	) {
		let paginator = Paginator::new(twenty_three, 5).unwrap();
		let page = paginator.page(requested).await.unwrap();
		assert_eq!(page.number, number);
		assert_eq!(page.len(), len);
	}

	#[rstest]
	#[tokio::test]
	async fn test_empty_source() {
		let paginator = Paginator::new(ArrayAdapter::default(), 10).unwrap();
		let page = paginator.page(4).await.unwrap();
		assert_eq!(page.number, 1);
		assert_eq!(page.num_pages, 0);
		assert!(page.is_empty());
		assert_eq!(page.start_index(), 0);
		assert!(page.next_page_number().is_err());
		assert!(page.previous_page_number().is_err());
	}

	#[rstest]
	fn test_zero_page_size_is_rejected() {
		assert!(matches!(
			Paginator::new(ArrayAdapter::default(), 0),
			Err(PaginationError::InvalidPage(_))
		));
	}

	#[rstest]
	#[case(None, 1)]
	#[case(Some("2"), 2)]
	#[case(Some(" last "), 5)]
	#[tokio::test]
	async fn test_page_from_param(
		twenty_three: ArrayAdapter,
		#[case] param: Option<&str>,
		#[case] number: usize,
	) {
		let paginator = Paginator::new(twenty_three, 5).unwrap();
		assert_eq!(paginator.page_from_param(param).await.unwrap().number, number);
	}

	#[rstest]
	#[case(PageParam::Number(3), 3)]
	#[case(PageParam::from("7"), 7)]
	#[case(PageParam::from(" Last "), usize::MAX)]
	fn test_page_param_resolves(#[case] param: PageParam, #[case] number: usize) {
		assert_eq!(param.resolve().unwrap(), number);
	}

	#[rstest]
	#[case(PageParam::Number(0))]
	#[case(PageParam::from("0"))]
	#[case(PageParam::from("first"))]
	fn test_page_param_rejects_zero_and_words(#[case] param: PageParam) {
		assert!(matches!(param.resolve(), Err(PaginationError::InvalidPage(_))));
	}

	#[rstest]
	fn test_page_param_deserializes_numbers_and_text() {
		let params: Vec<PageParam> = serde_json::from_str(r#"[4, "4", "last"]"#).unwrap();
		assert_eq!(
			params,
			[PageParam::Number(4), PageParam::from("4"), PageParam::from("last")]
		);
	}

	#[rstest]
	#[case("abc")]
	#[case("0")]
	#[case("-1")]
	#[tokio::test]
	async fn test_page_from_param_rejects_garbage(twenty_three: ArrayAdapter, #[case] param: &str) {
		let paginator = Paginator::new(twenty_three, 5).unwrap();
		assert!(paginator.page_from_param(Some(param)).await.is_err());
	}
}
