//! OpenAPI documentation served through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, open_time_handler, restaurant_handler, restaurant_type_handler, user_handler,
};
use crate::domain::{
    Coordinate, OpenTimeInput, OpenTimePatchInput, OpenTimeResponse, PickedRestaurantResponse,
    RestaurantDetailResponse, RestaurantResponse, RestaurantTypeResponse, UserResponse,
};
use crate::services::TokenResponse;
use crate::types::{MessageResponse, PaginatedRestaurants, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Daily Food",
        version = "0.1.0",
        description = "Save restaurants you like and let the server pick where to eat nearby",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers((url = "http://localhost:8000", description = "Local development server")),
    paths(
        auth_handler::register,
        auth_handler::login,
        user_handler::get_current_user,
        user_handler::delete_current_user,
        user_handler::list_saved_restaurants,
        user_handler::save_restaurant,
        user_handler::unsave_restaurant,
        restaurant_handler::list_restaurants,
        restaurant_handler::random_restaurants,
        restaurant_handler::get_restaurant,
        restaurant_handler::create_restaurant,
        restaurant_handler::update_restaurant,
        restaurant_handler::delete_restaurant,
        open_time_handler::list_open_times,
        open_time_handler::create_open_times,
        open_time_handler::update_open_time,
        open_time_handler::delete_open_time,
        restaurant_type_handler::list_types,
        restaurant_type_handler::create_type,
        restaurant_type_handler::tag_restaurant,
        restaurant_type_handler::untag_restaurant,
    ),
    components(
        schemas(
            Coordinate,
            UserResponse,
            RestaurantResponse,
            RestaurantDetailResponse,
            PickedRestaurantResponse,
            OpenTimeInput,
            OpenTimePatchInput,
            OpenTimeResponse,
            RestaurantTypeResponse,
            PaginatedRestaurants,
            PaginationMeta,
            MessageResponse,
            TokenResponse,
            auth_handler::RegisterRequest,
            auth_handler::TokenRequest,
            restaurant_handler::CreateRestaurantRequest,
            restaurant_handler::UpdateRestaurantRequest,
            open_time_handler::CreateOpenTimesRequest,
            restaurant_type_handler::CreateRestaurantTypeRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Accounts, tokens and saved restaurants"),
        (name = "Restaurants", description = "Restaurant records and the random nearby pick"),
        (name = "Open times", description = "Opening hours per restaurant"),
        (name = "Restaurant types", description = "Cuisine tags")
    )
)]
pub struct ApiDoc;

/// Registers the JWT bearer scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token obtained from /api/v1/users/token"))
                        .build(),
                ),
            );
        }
    }
}
