use actix_web::{web, Scope};

mod handlers;

pub fn category_service() -> Scope {
    web::scope("/categories")
        .service(handlers::get_categories)
        .service(handlers::create_category)
        .service(handlers::delete_category)
}

pub fn vendor_service() -> Scope {
    web::scope("/vendors")
        .service(handlers::get_vendors)
        .service(handlers::create_vendor)
        .service(handlers::delete_vendor)
}

pub fn payment_method_service() -> Scope {
    web::scope("/payment-methods")
        .service(handlers::get_payment_methods)
        .service(handlers::create_payment_method)
        .service(handlers::delete_payment_method)
}

pub fn tag_service() -> Scope {
    web::scope("/tags")
        .service(handlers::get_tags)
        .service(handlers::create_tag)
        .service(handlers::delete_tag)
}
