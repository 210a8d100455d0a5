pub mod payu;
