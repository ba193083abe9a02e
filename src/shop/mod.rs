//! Wandering vendor: buy catalog items, adopt a pet, sell inventory.

use crate::character::{Pet, Player};
use crate::core::constants::{PET_FOR_SALE_CHANCE, PET_PRICE, RARE_ITEM_FOR_SALE_CHANCE};
use crate::input::{choose_valid, parse_index, InputProvider, Menu};
use crate::items::{Item, SHOP_STOCK};
use rand::Rng;
use std::fmt;

pub const ADOPT_KEY: &str = "99";
pub const SELL_KEY: &str = "s";
pub const LEAVE_KEY: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopEvent {
    Opened { gold: u32 },
    Bought { item: String, price: u32 },
    NotEnoughGold { price: u32 },
    Adopted { pet: String },
    AlreadyHasPet,
    NoPetForSale,
    Sold { item: String, gold: u32 },
    NothingToSell,
    Left,
}

impl fmt::Display for ShopEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopEvent::Opened { gold } => write!(f, "=== Vendor Shop === Your Gold: {} coins", gold),
            ShopEvent::Bought { item, price } => {
                write!(f, "You bought {} for {} gold!", item, price)
            }
            ShopEvent::NotEnoughGold { price } => {
                write!(f, "You don't have enough gold ({} needed).", price)
            }
            ShopEvent::Adopted { pet } => write!(f, "You adopted {}!", pet),
            ShopEvent::AlreadyHasPet => write!(f, "You already have a companion."),
            ShopEvent::NoPetForSale => write!(f, "No pet is available right now."),
            ShopEvent::Sold { item, gold } => write!(f, "You sold {} for {} gold!", item, gold),
            ShopEvent::NothingToSell => write!(f, "You have no items to sell."),
            ShopEvent::Left => write!(f, "You leave the shop."),
        }
    }
}

/// A vendor's offer, fixed when the vendor appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vendor {
    stock: Vec<Item>,
    pet_for_sale: Option<Pet>,
}

impl Vendor {
    /// The standing stock, maybe one rare item, maybe a pet.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut stock: Vec<Item> = SHOP_STOCK.iter().filter_map(|name| Item::named(name)).collect();
        if rng.gen_bool(RARE_ITEM_FOR_SALE_CHANCE) {
            stock.push(Item::random_rare(rng));
        }
        let pet_for_sale = rng.gen_bool(PET_FOR_SALE_CHANCE).then(|| Pet::random(rng));
        Self::with_stock(stock, pet_for_sale)
    }

    pub fn with_stock(stock: Vec<Item>, pet_for_sale: Option<Pet>) -> Self {
        Self {
            stock,
            pet_for_sale,
        }
    }

    pub fn stock(&self) -> &[Item] {
        &self.stock
    }

    pub fn pet_for_sale(&self) -> Option<&Pet> {
        self.pet_for_sale.as_ref()
    }

    /// Buys the stock item at `index`. Stock is not depleted by purchases.
    pub fn buy(&self, index: usize, player: &mut Player) -> Option<ShopEvent> {
        let item = self.stock.get(index)?;
        if !player.spend_gold(item.price) {
            return Some(ShopEvent::NotEnoughGold { price: item.price });
        }
        player.pick_item(item.clone());
        Some(ShopEvent::Bought {
            item: item.name.clone(),
            price: item.price,
        })
    }

    /// Adopts the pet on offer. Owning a pet already blocks the sale before
    /// any gold changes hands, and a refused sale keeps the pet on offer.
    pub fn adopt(&mut self, player: &mut Player) -> ShopEvent {
        let Some(pet) = self.pet_for_sale.take() else {
            return ShopEvent::NoPetForSale;
        };
        let name = pet.name.clone();
        if let Err(pet) = player.adopt_pet(pet) {
            self.pet_for_sale = Some(pet);
            return ShopEvent::AlreadyHasPet;
        }
        if !player.spend_gold(PET_PRICE) {
            self.pet_for_sale = player.pet.take();
            return ShopEvent::NotEnoughGold { price: PET_PRICE };
        }
        ShopEvent::Adopted { pet: name }
    }

    /// Sells the inventory item at `slot` for half its price.
    pub fn sell(&self, slot: usize, player: &mut Player) -> Option<ShopEvent> {
        if slot >= player.inventory.len() {
            return None;
        }
        let item = player.inventory.remove(slot);
        let gold = item.sell_price();
        player.earn_gold(gold);
        Some(ShopEvent::Sold {
            item: item.name,
            gold,
        })
    }

    pub fn menu(&self, player: &Player) -> Menu {
        let mut menu = Menu::new(format!("Vendor Shop (Your Gold: {})", player.gold));
        for (i, item) in self.stock.iter().enumerate() {
            menu = menu.option((i + 1).to_string(), format!("{} - {} Gold", item, item.price));
        }
        if let Some(pet) = &self.pet_for_sale {
            menu = menu.option(
                ADOPT_KEY,
                format!(
                    "Adopt {} (Health: {}, Attack: {}) - {} Gold",
                    pet.name, pet.health, pet.attack, PET_PRICE
                ),
            );
        }
        menu.option(SELL_KEY, "Sell items")
            .option(LEAVE_KEY, "Exit Shop")
            .with_default(LEAVE_KEY)
    }
}

fn sell_menu(player: &Player) -> Menu {
    let mut menu = Menu::new("Sell Items");
    for (i, item) in player.inventory.iter().enumerate() {
        menu = menu.option(
            (i + 1).to_string(),
            format!("{} - Sell for {} Gold", item, item.sell_price()),
        );
    }
    menu.option(LEAVE_KEY, "Exit Selling").with_default(LEAVE_KEY)
}

/// Runs the shop until the player leaves. Invalid keys re-display the menu.
pub fn visit_shop(vendor: &mut Vendor, player: &mut Player, input: &mut impl InputProvider) {
    input.notify(&ShopEvent::Opened { gold: player.gold }.into());
    loop {
        let key = choose_valid(input, &vendor.menu(player));
        let event = match key.as_str() {
            LEAVE_KEY => {
                input.notify(&ShopEvent::Left.into());
                return;
            }
            ADOPT_KEY => Some(vendor.adopt(player)),
            SELL_KEY => sell_one(vendor, player, input),
            other => parse_index(other, vendor.stock().len()).and_then(|i| vendor.buy(i, player)),
        };
        if let Some(event) = event {
            log::debug!("shop: {:?}", event);
            input.notify(&event.into());
        }
    }
}

fn sell_one(
    vendor: &Vendor,
    player: &mut Player,
    input: &mut impl InputProvider,
) -> Option<ShopEvent> {
    if player.inventory.is_empty() {
        return Some(ShopEvent::NothingToSell);
    }
    let key = choose_valid(input, &sell_menu(player));
    parse_index(&key, player.inventory.len()).and_then(|slot| vendor.sell(slot, player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::GameEvent;
    use crate::input::ScriptedInput;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn plain_vendor() -> Vendor {
        Vendor::with_stock(
            SHOP_STOCK.iter().filter_map(|n| Item::named(n)).collect(),
            Some(Pet::new("Shadow Wolf", 40, 8)),
        )
    }

    #[test]
    fn test_new_vendor_has_standing_stock() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..50 {
            let vendor = Vendor::new(&mut rng);
            assert!(vendor.stock().len() == 9 || vendor.stock().len() == 10);
            assert_eq!(vendor.stock()[0].name, "Small Healing Potion");
        }
    }

    #[test]
    fn test_buy_spends_gold() {
        let vendor = plain_vendor();
        let mut player = Player::new("Test");
        let event = vendor.buy(0, &mut player).unwrap();
        assert_eq!(
            event,
            ShopEvent::Bought {
                item: "Small Healing Potion".to_string(),
                price: 10
            }
        );
        assert_eq!(player.gold, 40);
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(vendor.stock().len(), 9);
    }

    #[test]
    fn test_buy_without_gold() {
        let vendor = plain_vendor();
        let mut player = Player::with_stats("Test", 100, 10, 5);
        assert_eq!(
            vendor.buy(0, &mut player),
            Some(ShopEvent::NotEnoughGold { price: 10 })
        );
        assert!(player.inventory.is_empty());
        assert_eq!(player.gold, 5);
        assert_eq!(vendor.buy(42, &mut player), None);
    }

    #[test]
    fn test_adopt_pet() {
        let mut vendor = plain_vendor();
        let mut player = Player::with_stats("Test", 100, 10, 150);
        assert_eq!(
            vendor.adopt(&mut player),
            ShopEvent::Adopted {
                pet: "Shadow Wolf".to_string()
            }
        );
        assert_eq!(player.gold, 50);
        assert!(vendor.pet_for_sale().is_none());
        assert_eq!(vendor.adopt(&mut player), ShopEvent::NoPetForSale);
    }

    #[test]
    fn test_adopt_refused_when_pet_owned() {
        let mut vendor = plain_vendor();
        let mut player = Player::with_stats("Test", 100, 10, 500);
        player.pet = Some(Pet::new("Flame Tiger", 50, 10));
        assert_eq!(vendor.adopt(&mut player), ShopEvent::AlreadyHasPet);
        assert_eq!(player.gold, 500);
        assert!(vendor.pet_for_sale().is_some());
        assert_eq!(player.pet.as_ref().unwrap().name, "Flame Tiger");
    }

    #[test]
    fn test_adopt_without_gold_keeps_pet_on_offer() {
        let mut vendor = plain_vendor();
        let mut player = Player::with_stats("Test", 100, 10, 99);
        assert_eq!(
            vendor.adopt(&mut player),
            ShopEvent::NotEnoughGold { price: 100 }
        );
        assert_eq!(player.gold, 99);
        assert!(player.pet.is_none());
        assert_eq!(vendor.pet_for_sale().unwrap().name, "Shadow Wolf");

        player.earn_gold(1);
        assert_eq!(
            vendor.adopt(&mut player),
            ShopEvent::Adopted {
                pet: "Shadow Wolf".to_string()
            }
        );
        assert_eq!(player.gold, 0);
    }

    #[test]
    fn test_sell_returns_half_price() {
        let vendor = plain_vendor();
        let mut player = Player::new("Test");
        player.pick_item(Item::named("Iron Skin Potion").unwrap());
        assert_eq!(
            vendor.sell(0, &mut player),
            Some(ShopEvent::Sold {
                item: "Iron Skin Potion".to_string(),
                gold: 12
            })
        );
        assert_eq!(player.gold, 62);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn test_visit_shop_script() {
        let mut vendor = plain_vendor();
        let mut player = Player::with_stats("Test", 100, 10, 200);
        player.pick_item(Item::named("Luck Charm").unwrap());
        let mut input = ScriptedInput::new(["bogus", "2", "s", "1", "99", "0"]);

        visit_shop(&mut vendor, &mut player, &mut input);

        assert_eq!(player.gold, 200 - 25 + 30 - 100);
        assert_eq!(player.pet.as_ref().unwrap().name, "Shadow Wolf");
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.inventory[0].name, "Medium Healing Potion");
        assert!(input.events.contains(&GameEvent::InvalidChoice {
            input: "bogus".to_string()
        }));
        assert_eq!(input.events.last(), Some(&GameEvent::Shop(ShopEvent::Left)));
    }

    #[test]
    fn test_visit_shop_leaves_when_input_runs_out() {
        let mut vendor = plain_vendor();
        let mut player = Player::new("Test");
        let mut input = ScriptedInput::default();
        visit_shop(&mut vendor, &mut player, &mut input);
        assert_eq!(player.gold, 50);
    }
}
