//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// API
// =============================================================================

/// Version segment of every public route
pub const API_VERSION: &str = "v1";

/// Prefix all routes are nested under
pub const API_PREFIX: &str = "/api/v1";

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in minutes
pub const DEFAULT_JWT_EXPIRATION_MINUTES: i64 = 15;

/// Default signing algorithm name
pub const DEFAULT_JWT_ALGORITHM: &str = "HS256";

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per minute (for token expiration calculation)
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Token type reported to OAuth2 password-flow clients
pub const TOKEN_TYPE_BEARER: &str = "bearer";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (local SQLite file, created on demand)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://database.db?mode=rwc";

// =============================================================================
// Geocoding (MapQuest)
// =============================================================================

/// MapQuest geocoding API root
pub const DEFAULT_MAPQUEST_BASE_URL: &str = "https://www.mapquestapi.com/geocoding/v1";

/// Key used when MAPQUEST_API_KEY is unset
pub const DEFAULT_MAPQUEST_API_KEY: &str = "test_api";

/// Address lookup timeout
pub const DEFAULT_GEOCODING_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Restaurant selection
// =============================================================================

/// Mean Earth radius used by the distance filter (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Smallest number of restaurants a pick request may ask for
pub const MIN_PICK_LIMIT: u64 = 1;

/// Largest number of restaurants a pick request may ask for
pub const MAX_PICK_LIMIT: u64 = 10;

/// Number of restaurants picked when the request does not say
pub const DEFAULT_PICK_LIMIT: u64 = 1;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum username length (matches the `user.username` column)
pub const MAX_USERNAME_LENGTH: u64 = 30;

/// Maximum email length (matches the `user.email` column)
pub const MAX_EMAIL_LENGTH: u64 = 128;

/// Maximum restaurant name length
pub const MAX_RESTAURANT_NAME_LENGTH: u64 = 100;

/// Maximum phone number length
pub const MAX_PHONE_LENGTH: u64 = 20;

/// Maximum restaurant type name length
pub const MAX_TYPE_NAME_LENGTH: u64 = 30;

/// Clock format accepted for opening hours and the pick filter
pub const CLOCK_TIME_FORMAT: &str = "%H:%M";
