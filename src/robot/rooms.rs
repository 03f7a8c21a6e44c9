use super::models::{GridPosition, Room, RoomIcon, RoomId};

/// The fixed four-room house map, laid out on a 2x2 grid.
pub static ROOMS: [Room; 4] = [
    Room {
        id: RoomId::LivingRoom,
        name: "Living Room",
        icon: RoomIcon::Sofa,
        position: GridPosition { x: 0, y: 0 },
    },
    Room {
        id: RoomId::Bedroom,
        name: "Bedroom",
        icon: RoomIcon::Bed,
        position: GridPosition { x: 1, y: 0 },
    },
    Room {
        id: RoomId::Kitchen,
        name: "Kitchen",
        icon: RoomIcon::Chef,
        position: GridPosition { x: 0, y: 1 },
    },
    Room {
        id: RoomId::StoreRoom,
        name: "Store Room",
        icon: RoomIcon::Package,
        position: GridPosition { x: 1, y: 1 },
    },
];
