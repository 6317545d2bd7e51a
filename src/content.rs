//! Built-in study content: the region catalogue shown on the map and the
//! bilingual history/contribution/meaning/milestone tables behind each pin.
//!
//! This is curated static data; nothing here is generated by a model.

use crate::domain::{Coordinates, Language, Milestone, RegionContent, RegionId, RegionSummary};

struct Localized {
  vi: &'static str,
  en: &'static str,
}

impl Localized {
  fn get(&self, lang: Language) -> &'static str {
    lang.pick(self.vi, self.en)
  }
}

struct RegionEntry {
  id: RegionId,
  name: Localized,
  short_description: Localized,
  top: &'static str,
  left: &'static str,
}

const REGIONS: [RegionEntry; 5] = [
  RegionEntry {
    id: RegionId::Un,
    name: Localized { vi: "Liên Hợp Quốc (UN)", en: "United Nations (UN)" },
    short_description: Localized {
      vi: "Việt Nam là thành viên tích cực, có trách nhiệm, giữ vai trò quan trọng trong Hội đồng Bảo an.",
      en: "Vietnam is an active, responsible member, playing an important role in the Security Council.",
    },
    top: "32%",
    left: "26%",
  },
  RegionEntry {
    id: RegionId::Eu,
    name: Localized { vi: "Liên Minh Châu Âu (EU)", en: "European Union (EU)" },
    short_description: Localized {
      vi: "Đối tác chiến lược về kinh tế, thương mại với Hiệp định EVFTA mang tính lịch sử.",
      en: "Strategic partner in economy and trade with the historic EVFTA agreement.",
    },
    top: "25%",
    left: "52%",
  },
  RegionEntry {
    id: RegionId::Africa,
    name: Localized { vi: "Châu Phi", en: "Africa" },
    short_description: Localized {
      vi: "Đối tác truyền thống, hợp tác nông nghiệp và lực lượng gìn giữ hòa bình Liên Hợp Quốc.",
      en: "Traditional partner, agricultural cooperation and UN peacekeeping forces.",
    },
    top: "55%",
    left: "53%",
  },
  RegionEntry {
    id: RegionId::Asean,
    name: Localized { vi: "ASEAN", en: "ASEAN" },
    short_description: Localized {
      vi: "Gia đình khu vực, nền tảng cho sự ổn định, hòa bình và thịnh vượng chung của Đông Nam Á.",
      en: "Regional family, foundation for stability, peace, and shared prosperity of Southeast Asia.",
    },
    top: "55%",
    left: "78%",
  },
  RegionEntry {
    id: RegionId::Apec,
    name: Localized { vi: "APEC", en: "APEC" },
    short_description: Localized {
      vi: "Diễn đàn hợp tác kinh tế hàng đầu, thúc đẩy tự do hóa thương mại và đầu tư.",
      en: "Leading economic cooperation forum, promoting trade and investment liberalization.",
    },
    top: "38%",
    left: "90%",
  },
];

const HCM_IDEOLOGY_NAME: Localized =
  Localized { vi: "Vận Dụng Tư Tưởng Hồ Chí Minh", en: "Applying Ho Chi Minh's Ideology" };

/// Map pins in display order, localized.
pub fn regions(lang: Language) -> Vec<RegionSummary> {
  REGIONS
    .iter()
    .map(|r| RegionSummary {
      id: r.id,
      name: r.name.get(lang).to_string(),
      short_description: r.short_description.get(lang).to_string(),
      coordinates: Coordinates { top: r.top, left: r.left },
    })
    .collect()
}

/// Every name a region may be referred to by, across both languages.
pub fn region_aliases(id: RegionId) -> Vec<&'static str> {
  let mut out = vec![id.as_str()];
  match REGIONS.iter().find(|r| r.id == id) {
    Some(r) => {
      out.push(r.name.vi);
      out.push(r.name.en);
    }
    None => {
      out.push(HCM_IDEOLOGY_NAME.vi);
      out.push(HCM_IDEOLOGY_NAME.en);
    }
  }
  out
}

/// Static study content. Unknown ids get a localized "being updated" placeholder.
pub fn region_details(region_id: &str, lang: Language) -> RegionContent {
  match RegionId::parse(region_id).and_then(|id| static_content(id, lang)) {
    Some(c) => c,
    None => {
      let fallback = lang.pick("Thông tin đang được cập nhật.", "Information is being updated.");
      RegionContent {
        history: fallback.into(),
        contribution: fallback.into(),
        meaning: fallback.into(),
        milestones: vec![],
      }
    }
  }
}

fn content(history: &str, contribution: &str, meaning: &str, milestones: &[(&str, &str)]) -> RegionContent {
  RegionContent {
    history: history.into(),
    contribution: contribution.into(),
    meaning: meaning.into(),
    milestones: milestones
      .iter()
      .map(|(year, event)| Milestone { year: (*year).into(), event: (*event).into() })
      .collect(),
  }
}

fn static_content(id: RegionId, lang: Language) -> Option<RegionContent> {
  let c = match (id, lang) {
    (RegionId::Un, Language::Vi) => content(
      "Việt Nam chính thức gia nhập Liên Hợp Quốc ngày 20/9/1977, đánh dấu sự công nhận của cộng đồng quốc tế ngay sau khi đất nước thống nhất. Từ một quốc gia nhận viện trợ nhân đạo để tái thiết sau chiến tranh, Việt Nam đã vươn lên trở thành một đối tác tích cực, chủ động tham gia vào các cơ chế hoạch định chính sách toàn cầu.",
      "Việt Nam đã hai lần đảm nhiệm thành công vai trò Ủy viên không thường trực Hội đồng Bảo an (2008-2009 và 2020-2021) với số phiếu tín nhiệm kỷ lục. Đặc biệt, Việt Nam đã cử lực lượng tham gia gìn giữ hòa bình Liên Hợp Quốc tại Nam Sudan và Cộng hòa Trung Phi, cũng như đề xuất lấy ngày 27/12 là 'Ngày Quốc tế phòng chống dịch bệnh'.",
      "Liên Hợp Quốc là diễn đàn quan trọng nhất để Việt Nam khẳng định đường lối ngoại giao độc lập, tự chủ, đa phương hóa, đa dạng hóa. Hợp tác với UN giúp Việt Nam nâng cao vị thế chính trị, bảo vệ lợi ích quốc gia dựa trên luật pháp quốc tế và tranh thủ nguồn lực cho phát triển bền vững (MDGs, SDGs).",
      &[
        ("1977", "Gia nhập Liên Hợp Quốc (Thành viên thứ 149)."),
        ("2008", "Lần đầu tiên trúng cử Ủy viên không thường trực HĐBA (2008-2009)."),
        ("2014", "Chính thức cử lực lượng tham gia Gìn giữ hòa bình LHQ."),
        ("2020", "Đảm nhiệm Ủy viên không thường trực HĐBA nhiệm kỳ 2 (2020-2021)."),
        ("2022", "Trúng cử Hội đồng Nhân quyền LHQ nhiệm kỳ 2023-2025."),
      ],
    ),
    (RegionId::Un, Language::En) => content(
      "Vietnam officially joined the United Nations on September 20, 1977, marking international recognition shortly after national reunification. Transforming from a recipient of humanitarian aid for post-war reconstruction, Vietnam has risen to become an active partner, proactively participating in global policy-making mechanisms.",
      "Vietnam has successfully served twice as a Non-Permanent Member of the Security Council (2008-2009 and 2020-2021) with record confidence votes. Notably, Vietnam has deployed forces to UN peacekeeping missions in South Sudan and the Central African Republic, and proposed December 27 as the 'International Day of Epidemic Preparedness'.",
      "The UN is the most critical forum for Vietnam to affirm its foreign policy of independence, self-reliance, multilateralism, and diversification. Cooperation with the UN helps Vietnam elevate its political status, protect national interests based on international law, and leverage resources for sustainable development (MDGs, SDGs).",
      &[
        ("1977", "Joined the United Nations (149th Member)."),
        ("2008", "Elected as UNSC Non-Permanent Member for the first time (2008-2009)."),
        ("2014", "Officially deployed forces for UN Peacekeeping."),
        ("2020", "Served second term as UNSC Non-Permanent Member (2020-2021)."),
        ("2022", "Elected to the UN Human Rights Council (2023-2025)."),
      ],
    ),
    (RegionId::Asean, Language::Vi) => content(
      "Ngày 28/7/1995, Việt Nam chính thức gia nhập ASEAN tại Brunei. Đây là bước đột phá phá thế bao vây cấm vận, mở đầu cho quá trình hội nhập khu vực và quốc tế sâu rộng. Từ một nước có chế độ chính trị khác biệt, Việt Nam đã trở thành một thành viên nòng cốt, dẫn dắt sự đoàn kết trong khối.",
      "Việt Nam đóng vai trò then chốt trong việc xác định mục tiêu và lộ trình hình thành Cộng đồng ASEAN (2015) và Tầm nhìn ASEAN 2025. Nước ta đã tổ chức thành công nhiều hội nghị cấp cao, giữ vai trò điều phối quan hệ ASEAN với các đối tác lớn, và thúc đẩy giải quyết hòa bình các tranh chấp trên Biển Đông dựa trên luật pháp quốc tế (UNCLOS 1982).",
      "ASEAN là 'vòng đai an ninh' trực tiếp và là thị trường quan trọng của Việt Nam. Hội nhập ASEAN tạo nền tảng vững chắc để Việt Nam mở rộng quan hệ với các nước lớn, duy trì môi trường hòa bình, ổn định để phát triển kinh tế và nâng cao vị thế địa chính trị trong khu vực Đông Nam Á.",
      &[
        ("1995", "Chính thức gia nhập ASEAN."),
        ("1998", "Tổ chức thành công Hội nghị Cấp cao ASEAN lần thứ 6 tại Hà Nội."),
        ("2010", "Chủ tịch ASEAN: Thúc đẩy mở rộng Cấp cao Đông Á (EAS) (kết nạp Nga, Mỹ)."),
        ("2015", "Cộng đồng Kinh tế ASEAN (AEC) chính thức hình thành."),
        ("2020", "Chủ tịch ASEAN: Dẫn dắt khối vượt qua đại dịch COVID-19."),
      ],
    ),
    (RegionId::Asean, Language::En) => content(
      "On July 28, 1995, Vietnam officially joined ASEAN in Brunei. This was a breakthrough in breaking the embargo, initiating extensive regional and international integration. From a country with a different political system, Vietnam has become a core member, leading solidarity within the bloc.",
      "Vietnam played a key role in defining the goals and roadmap for the formation of the ASEAN Community (2015) and ASEAN Vision 2025. The country has successfully hosted many summits, coordinated ASEAN relations with major partners, and promoted peaceful resolution of South China Sea disputes based on international law (UNCLOS 1982).",
      "ASEAN serves as Vietnam's immediate 'security belt' and a crucial market. ASEAN integration provides a solid foundation for Vietnam to expand relations with major powers, maintain a peaceful and stable environment for economic development, and enhance its geopolitical position in Southeast Asia.",
      &[
        ("1995", "Officially joined ASEAN."),
        ("1998", "Successfully hosted the 6th ASEAN Summit in Hanoi."),
        ("2010", "ASEAN Chair: Promoted expansion of East Asia Summit (EAS) (admitting Russia, USA)."),
        ("2015", "ASEAN Economic Community (AEC) officially established."),
        ("2020", "ASEAN Chair: Led the bloc through the COVID-19 pandemic."),
      ],
    ),
    (RegionId::Apec, Language::Vi) => content(
      "Việt Nam gia nhập Diễn đàn Hợp tác Kinh tế Châu Á - Thái Bình Dương (APEC) vào năm 1998. Đây là quyết định chiến lược nhằm hội nhập vào khu vực kinh tế năng động nhất thế giới, nơi quy tụ các nền kinh tế hàng đầu như Mỹ, Trung Quốc, Nhật Bản.",
      "Dù là nền kinh tế đang phát triển, Việt Nam đã hai lần đăng cai tổ chức thành công Năm APEC (2006 và 2017). Đặc biệt, Hội nghị APEC Đà Nẵng 2017 đã giữ vững đà tự do hóa thương mại trong bối cảnh chủ nghĩa bảo hộ gia tăng, thông qua 'Tầm nhìn APEC sau 2020'.",
      "APEC mang lại lợi ích kinh tế trực tiếp: 77% thương mại, 81% vốn đầu tư trực tiếp và 85% lượng khách du lịch đến Việt Nam là từ các thành viên APEC. Đây cũng là kênh quan trọng để Việt Nam làm sâu sắc thêm quan hệ song phương với các đối tác chiến lược hàng đầu.",
      &[
        ("1998", "Chính thức trở thành thành viên APEC."),
        ("2006", "Đăng cai APEC lần 1 tại Hà Nội (Kết nạp Việt Nam vào WTO bên lề)."),
        ("2017", "Đăng cai APEC lần 2 tại Đà Nẵng - Khẳng định vai trò dẫn dắt."),
        ("2023", "Chủ tịch nước tham dự APEC tại Mỹ, nâng cấp quan hệ Việt-Mỹ, Việt-Nhật."),
      ],
    ),
    (RegionId::Apec, Language::En) => content(
      "Vietnam joined the Asia-Pacific Economic Cooperation (APEC) forum in 1998. This was a strategic decision to integrate into the world's most dynamic economic region, gathering leading economies such as the US, China, and Japan.",
      "Despite being a developing economy, Vietnam successfully hosted the APEC Year twice (2006 and 2017). Notably, the APEC Da Nang 2017 Summit maintained the momentum of trade liberalization amidst rising protectionism, adopting the 'Post-2020 APEC Vision'.",
      "APEC brings direct economic benefits: 77% of trade, 81% of direct investment, and 85% of tourists to Vietnam come from APEC members. It is also a crucial channel for Vietnam to deepen bilateral relations with top strategic partners.",
      &[
        ("1998", "Officially became an APEC member."),
        ("2006", "Hosted APEC for the 1st time in Hanoi (WTO accession finalized on sidelines)."),
        ("2017", "Hosted APEC for the 2nd time in Da Nang - Affirming leadership role."),
        ("2023", "President attended APEC in the US, upgraded Vietnam-US, Vietnam-Japan ties."),
      ],
    ),
    (RegionId::Eu, Language::Vi) => content(
      "Thiết lập quan hệ ngoại giao từ năm 1990, quan hệ Việt Nam - EU đã phát triển vượt bậc từ hỗ trợ nhân đạo sang đối tác bình đẳng cùng có lợi. Năm 2012, hai bên ký Hiệp định Đối tác và Hợp tác toàn diện (PCA).",
      "Việt Nam là quốc gia đang phát triển đầu tiên ở khu vực Châu Á - Thái Bình Dương ký Hiệp định Thương mại Tự do (EVFTA) với EU. Việt Nam cũng là cầu nối quan trọng thúc đẩy quan hệ ASEAN - EU lên Đối tác chiến lược.",
      "EU là đối tác quan trọng hàng đầu về thương mại, đầu tư và viện trợ không hoàn lại. Hiệp định EVFTA (có hiệu lực từ 1/8/2020) và EVIPA (Bảo hộ đầu tư) là 'cặp lá chắn' giúp hàng hóa Việt Nam tiếp cận thị trường 450 triệu dân với tiêu chuẩn cao, thúc đẩy cải cách thể chế và phát triển bền vững.",
      &[
        ("1990", "Thiết lập quan hệ ngoại giao Việt Nam - EC (tiền thân EU)."),
        ("2012", "Ký Hiệp định Đối tác và Hợp tác toàn diện (PCA)."),
        ("2019", "Ký kết Hiệp định EVFTA và EVIPA tại Hà Nội."),
        ("2020", "Hiệp định EVFTA chính thức có hiệu lực."),
        ("2022", "Thủ tướng dự Hội nghị Cấp cao ASEAN-EU tại Brussels."),
      ],
    ),
    (RegionId::Eu, Language::En) => content(
      "Established diplomatic relations in 1990, Vietnam-EU relations have grown significantly from humanitarian aid to equal, mutually beneficial partnerships. In 2012, both sides signed the Partnership and Cooperation Agreement (PCA).",
      "Vietnam is the first developing country in the Asia-Pacific region to sign a Free Trade Agreement (EVFTA) with the EU. Vietnam also serves as a vital bridge promoting ASEAN-EU relations to a Strategic Partnership.",
      "The EU is a leading partner in trade, investment, and non-refundable aid. The EVFTA (effective Aug 1, 2020) and EVIPA (Investment Protection) act as 'twin shields' helping Vietnamese goods access a market of 450 million people with high standards, driving institutional reform and sustainable development.",
      &[
        ("1990", "Established diplomatic relations with EC (predecessor to EU)."),
        ("2012", "Signed Partnership and Cooperation Agreement (PCA)."),
        ("2019", "Signed EVFTA and EVIPA in Hanoi."),
        ("2020", "EVFTA officially entered into force."),
        ("2022", "PM attended ASEAN-EU Commemorative Summit in Brussels."),
      ],
    ),
    (RegionId::Africa, Language::Vi) => content(
      "Việt Nam và các nước Châu Phi có mối quan hệ hữu nghị truyền thống, được hình thành từ những năm tháng cùng đấu tranh giải phóng dân tộc. Việt Nam thiết lập quan hệ ngoại giao với hầu hết các quốc gia Châu Phi (54/55 nước).",
      "Việt Nam triển khai mô hình hợp tác Nam - Nam và hợp tác ba bên (với FAO) rất hiệu quả, cử hàng trăm chuyên gia nông nghiệp, y tế, giáo dục sang giúp các nước Châu Phi đảm bảo an ninh lương thực. Tập đoàn Viettel đầu tư viễn thông thành công tại nhiều nước (Mozambique, Tanzania, Burundi...).",
      "Châu Phi là nguồn ủng hộ chính trị quan trọng của Việt Nam tại các diễn đàn đa phương. Đây cũng là thị trường tiềm năng về xuất khẩu gạo, hàng tiêu dùng và đầu tư năng lượng, khoáng sản. Quan hệ này thể hiện đạo lý 'uống nước nhớ nguồn' và tinh thần quốc tế vô sản của Việt Nam.",
      &[
        ("1950s", "Đặt nền móng quan hệ trong phong trào giải phóng dân tộc."),
        ("2010", "Đề án phát triển quan hệ Việt Nam - Trung Đông - Châu Phi."),
        ("2014", "Cử lực lượng gìn giữ hòa bình đầu tiên tới Nam Sudan."),
        ("2023", "Việt Nam trở thành Quan sát viên của Liên minh Châu Phi (AU)."),
      ],
    ),
    (RegionId::Africa, Language::En) => content(
      "Vietnam and African countries share a traditional friendship formed during the years of struggle for national liberation. Vietnam has established diplomatic relations with almost all African nations (54/55 countries).",
      "Vietnam effectively implements South-South and trilateral cooperation models (with FAO), sending hundreds of agricultural, medical, and educational experts to help African countries ensure food security. Viettel Group has successfully invested in telecommunications in many countries (Mozambique, Tanzania, Burundi...).",
      "Africa is a crucial source of political support for Vietnam at multilateral forums. It is also a potential market for rice exports, consumer goods, and investment in energy and minerals. This relationship reflects Vietnam's moral principle of gratitude and international solidarity.",
      &[
        ("1950s", "Laid foundation during national liberation movements."),
        ("2010", "Project to develop relations with Middle East - Africa."),
        ("2014", "Deployed first peacekeeping forces to South Sudan."),
        ("2023", "Vietnam became an Observer of the African Union (AU)."),
      ],
    ),
    (RegionId::HcmIdeology, _) => return None,
  };
  Some(c)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_map_region_has_content_in_both_languages() {
    for id in RegionId::MAP {
      for lang in [Language::Vi, Language::En] {
        let c = region_details(id.as_str(), lang);
        assert!(!c.milestones.is_empty(), "{id:?}/{lang}");
        assert!(!c.history.is_empty());
      }
    }
  }

  #[test]
  fn lookup_is_case_insensitive() {
    let c = region_details("asean", Language::En);
    assert_eq!(c.milestones[0].year, "1995");
  }

  #[test]
  fn unknown_region_gets_localized_placeholder() {
    let vi = region_details("ATLANTIS", Language::Vi);
    assert_eq!(vi.history, "Thông tin đang được cập nhật.");
    assert!(vi.milestones.is_empty());

    let en = region_details("HCM_IDEOLOGY", Language::En);
    assert_eq!(en.meaning, "Information is being updated.");
  }

  #[test]
  fn catalogue_is_localized() {
    let en = regions(Language::En);
    assert_eq!(en.len(), 5);
    assert_eq!(en[0].name, "United Nations (UN)");
    assert_eq!(regions(Language::Vi)[1].name, "Liên Minh Châu Âu (EU)");
    assert!(region_aliases(RegionId::HcmIdeology).contains(&"Applying Ho Chi Minh's Ideology"));
  }
}
