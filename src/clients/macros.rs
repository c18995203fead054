/// Generates `new(inner)` for a client wrapping a `ResourceClient`.
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

/// Generates `get_<entity>(id)`, mapping table errors into the given variant.
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty => $variant:ident, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: String) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(|e| <$error>::$variant(e.to_string()))
                }
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ty => $variant:ident, $entity_name_snake:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_methods!($client_name, $entity, $error => $variant, $entity_name_snake);
    };
}
