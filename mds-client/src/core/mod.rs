pub mod http;
pub mod mock;
pub mod query;
pub mod session;

pub use self::http::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use mock::{MockReply, MockTransport};
pub use query::{QueryParams, ToQuery};
pub use session::{AUTH_HEADER, ResponseBody, Session};
