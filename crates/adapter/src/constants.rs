use http::header::HeaderName;

/// Bidder code this adapter registers under.
pub const BIDDER_CODE: &str = "verizonmedia";

/// Default SSP auction endpoint, used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://c2shb.ssp.yahoo.com/bidRequest";

/// Currency assumed when the response carries no top-level `cur`.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Cache lifetime the auction engine should apply to returned bids.
pub const BID_RESPONSE_TTL_SECONDS: u32 = 3600;

/// OpenRTB protocol version sent with every auction request.
pub const OPENRTB_VERSION: &str = "2.3";

pub const HEADER_OPENRTB_VERSION: HeaderName = HeaderName::from_static("x-openrtb-version");

/// Creative MIME types accepted for banner impressions.
pub const BANNER_MIMES: [&str; 4] = [
    "text/html",
    "text/javascript",
    "application/javascript",
    "image/jpg",
];

/// Identity sources the SSP is contracted to accept in `user.ext.eids`.
pub const SUPPORTED_EID_SOURCES: [&str; 2] = ["verizonmedia.com", "liveramp.com"];
