pub mod groups_mem_repo;
pub mod places_mem_repo;
pub mod users_mem_repo;

pub use groups_mem_repo::InMemoryGroupsRepository;
pub use places_mem_repo::InMemoryPlacesRepository;
pub use users_mem_repo::InMemoryUsersRepository;
