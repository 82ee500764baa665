// URL builders for the Riot and Data Dragon endpoints the client calls.

pub const DATA_DRAGON_VERSIONS: &str = "https://ddragon.leagueoflegends.com/api/versions.json";

pub fn regional_routing(platform: &str) -> &'static str {
    match platform {
        "na1" | "br1" | "la1" | "la2" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" | "me1" => "europe",
        "kr" | "jp1" => "asia",
        "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
        _ => "americas", // default
    }
}

pub fn account_by_riot_id(routing: &str, game_name: &str, tag_line: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/riot/account/v1/accounts/by-riot-id/{}/{}",
        routing,
        game_name.replace(' ', "%20"),
        tag_line
    )
}

pub fn match_ids_by_puuid(routing: &str, puuid: &str, count: usize) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/by-puuid/{}/ids?start=0&count={}",
        routing, puuid, count
    )
}

pub fn match_detail(routing: &str, match_id: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/{}",
        routing, match_id
    )
}

pub fn match_timeline(routing: &str, match_id: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/{}/timeline",
        routing, match_id
    )
}

pub fn data_dragon_items(version: &str) -> String {
    format!(
        "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/item.json",
        version
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platforms_route_to_regions() {
        assert_eq!(regional_routing("euw1"), "europe");
        assert_eq!(regional_routing("kr"), "asia");
        assert_eq!(regional_routing("unknown"), "americas");
    }

    #[test]
    fn timeline_url_extends_match_url() {
        assert_eq!(
            match_timeline("europe", "EUW1_1"),
            format!("{}/timeline", match_detail("europe", "EUW1_1"))
        );
    }
}
