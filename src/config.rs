pub static SUPABASE_URL: &str = match option_env!("SUPABASE_URL") {
	Some(url) => url,
	None => "https://myeijeejhfzlxptlerqi.supabase.co",
};
// Publishable key, safe to ship to the browser. Row-level security does the gatekeeping.
pub static SUPABASE_KEY: &str = match option_env!("SUPABASE_KEY") {
	Some(key) => key,
	None => "sb_publishable_nxNqdHoTMIg9qpFrguVsvQ_myylV-lQ",
};

pub static PROJECTS_TABLE: &str = "dev_uploads";
pub static ORDERS_TABLE: &str = "orders";

pub static IMAGE_BUCKET: &str = "project-images";
pub static ARCHIVE_BUCKET: &str = "project-zips";

pub static OAUTH_PROVIDER: &str = "google";
pub static OAUTH_CALLBACK_PATH: &str = "/auth/callback";

pub static GUEST_EMAIL: &str = "guest@mieltecity.com";
pub static GUEST_NAME: &str = "Guest User";
pub static SUPPORT_EMAIL: &str = "hackeruchiha928@gmail.com";
