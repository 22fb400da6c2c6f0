//! # Routes
//!
//! ```text
//! GET    /health                             liveness
//! GET    /api/durations                      duration catalog
//! GET    /api/rent/{tool}                    rental view (?duration=&quantity=)
//! POST   /api/rent/{tool}/actions            selectDuration / changeQuantity
//! POST   /api/rent/{tool}/cart               add selection to cart
//! POST   /api/rent/{tool}/checkout           pay through the sandbox gateway
//! POST   /api/rent/{tool}/checkout/outcome   settle a client-reported outcome
//! GET    /api/cart                           cart + totals
//! DELETE /api/cart                           clear
//! DELETE /api/cart/{id}                      remove one line
//! *                                          not-found view
//! ```

pub mod cart;
pub mod pages;
pub mod rent;
