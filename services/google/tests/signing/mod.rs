mod credentials;
mod v2;
mod v4;
