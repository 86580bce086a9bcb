//! Wire-protocol constants
//!
//! Centralized location for the portal endpoints, cookie names, and fixed
//! form values recovered from the portal's own frontend.

// Production hosts
pub const DEFAULT_PORTAL_BASE_URL: &str = "https://www.tigrison.com";
pub const DEFAULT_API_BASE_URL: &str = "https://api.tigris5240.com";

// Portal endpoints
pub const LOGIN_PATH: &str = "/login";
pub const INDEX_PATH: &str = "/hr/index";

// Secondary API host endpoints
pub const SESSION_CHECK_PATH: &str = "/chkLoginSession.do";
pub const MENU_REGISTER_PATH: &str = "/setLocationProgCdforLog.do";
pub const CALENDAR_PATH: &str = "/TAADclzVcatnCldrMgr.do";
pub const CALENDAR_COMMAND: &str = "getTAADclzVcatnCldrMgr";
pub const ERROR_REDIRECT_PATH: &str = "Error.do";
pub const NO_MATCHING_DATA_PATH: &str = "NoMatchingData.do";

// Cookie names
pub const PORTAL_SESSION_COOKIE: &str = "_tigris_sid";
pub const API_SESSION_COOKIE: &str = "JSESSIONID";
pub const COLUMN_SHOW_COOKIE: &str = "colShowYn";

// Fixed login form values. The portal frontend always submits these verbatim.
pub const LOGIN_TIME_ZONE: &str = "Asia/Seoul";

// Menu registration form values. Registering this exact menu location is
// required before the calendar search returns company-wide results.
pub const MENU_LOCATION: &str =
    "직원 Self Service > 직원(SelfService) > 인사정보 > <span>휴가자조회(달력)  [ TAA-0370 ]</span>";
pub const MENU_PROG_CD: &str = "TAA-0370";
pub const MENU_CD: &str = "100-0124";
pub const MENU_DATA_RW_TYPE: &str = "R";

// Session check success marker
pub const SESSION_CHECK_OK: &str = "Login!";

/// Wire timestamps are always expressed at the portal's fixed UTC offset
/// (+09:00), regardless of the caller's time zone.
pub const WIRE_UTC_OFFSET_SECS: i32 = 9 * 3600;
