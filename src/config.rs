//! Application-level configuration constants.

// Endpoints
pub const CONFIG_ENDPOINT: &str = "/api/config";
pub const USER_ENDPOINT: &str = "/api/user";
pub const THREAD_ENDPOINT: &str = "/api/thread";
pub const LAST_REQUEST_ENDPOINT: &str = "/api/last_request";
pub const LOGOUT_PATH: &str = "/logout";

// Page integration
pub const BOOTSTRAP_ELEMENT_ID: &str = "bumper-state";
pub const TITLE_PREFIX: &str = "Bumper :: ";

// UI behavior
pub const SNACKBAR_DURATION_MS: u32 = 3_000;
pub const SNACKBAR_VISIBLE_CLASS: &str = "show";
pub const ACTIVE_LINK_CLASS: &str = "is-active";
pub const CONTENT_TAB_CLASS: &str = "content-tab";

// Tabs, in navigation order. The first one is opened on mount.
pub const TABS: [&str; 4] = ["dashboard", "threads", "config", "user"];

// Snackbar messages
pub const MSG_CONFIG_UPDATED: &str = "Successfully updated configuration";
pub const MSG_CONFIG_FAILED: &str = "Couldn't update the configuration";
pub const MSG_USER_UPDATED: &str = "Successfully updated the user";
pub const MSG_USER_FAILED: &str = "Couldn't update the user";
pub const MSG_THREAD_UPDATED: &str = "Successfully updated the thread";
pub const MSG_THREAD_UPDATE_FAILED: &str = "Couldn't update the thread";
pub const MSG_THREAD_DELETED: &str = "Successfully deleted the thread";
pub const MSG_THREAD_DELETE_FAILED: &str = "Couldn't delete the thread";
pub const MSG_THREAD_CREATED: &str = "Successfully added the thread";
pub const MSG_THREAD_CREATE_FAILED: &str = "Couldn't add the thread";
pub const MSG_LAST_REQUEST_FAILED: &str = "Couldn't load the last request";
pub const MSG_UNREACHABLE: &str = "Couldn't reach the server";
pub const MSG_NO_SELECTION: &str = "No thread selected";
pub const MSG_DUPLICATE_THREAD: &str = "Thread already exists";
